use crate::error::FetchError;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Access token for the release API. Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Everything one invocation needs, already validated by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchParams {
    /// Base URL of the server, e.g. `https://github.example.com`
    pub url: String,

    pub owner: String,

    pub repo: String,

    pub token: Token,

    /// Release tag; `None` selects the latest release.
    #[serde(default)]
    pub tag: Option<String>,

    /// Directory receiving the assets; `None` means the current directory.
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Exact asset names to download; `None` downloads every asset.
    #[serde(default, deserialize_with = "deserialize_asset_names")]
    pub asset_names: Option<Vec<String>>,

    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Report what would happen without touching the network or disk.
    #[serde(default, rename = "_ansible_check_mode")]
    pub check_mode: bool,
}

impl FetchParams {
    pub fn new(url: &str, owner: &str, repo: &str, token: Token) -> Self {
        Self {
            url: url.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token,
            tag: None,
            output_path: None,
            asset_names: None,
            timeout: None,
            check_mode: false,
        }
    }

    /// Reads parameters from a JSON args file as written by the automation host.
    /// Keys the module does not know about are ignored.
    pub fn from_args_file(path: &Path) -> Result<Self, serde_json::Error> {
        let content = std::fs::read_to_string(path).map_err(serde_json::Error::io)?;
        serde_json::from_str(&content)
    }

    /// The directory assets are written to for this run.
    pub fn destination_dir(&self) -> Result<PathBuf, FetchError> {
        match &self.output_path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().map_err(FetchError::CurrentDir),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// The host hands list parameters over either as a JSON list or as a single
/// comma separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum AssetNames {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_asset_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Option::<AssetNames>::deserialize(deserializer)?.map(|names| match names {
        AssetNames::List(list) => list,
        AssetNames::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    });
    Ok(names)
}
