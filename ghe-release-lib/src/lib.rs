pub mod config;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod logging;
pub mod outcome;
pub mod release_client;

#[cfg(test)]
pub mod test_helpers;
