use crate::error::FetchError;
use crate::github::{Release, ReleaseAsset};
use std::path::{Path, PathBuf};

pub trait ReleaseClient {
    /// Resolves the release named by `tag`, or the latest release when `tag` is `None`.
    fn release(&self, tag: Option<&str>) -> impl Future<Output = Result<Release, FetchError>> + Send;

    /// Streams one asset into `destination_dir` and returns the written path.
    fn download_asset(
        &self,
        asset: &ReleaseAsset,
        destination_dir: &Path,
    ) -> impl Future<Output = Result<PathBuf, FetchError>> + Send;
}
