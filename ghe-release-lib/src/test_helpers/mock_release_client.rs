use crate::error::FetchError;
use crate::github::{Release, ReleaseAsset};
use crate::release_client::ReleaseClient;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory release with scripted failures. Records every call it receives.
pub struct MockReleaseClient {
    assets: Vec<ReleaseAsset>,
    release_error: Option<fn() -> FetchError>,
    failing_asset: Option<u64>,
    pub requested_tags: Mutex<Vec<Option<String>>>,
    pub downloaded: Mutex<Vec<u64>>,
}

impl MockReleaseClient {
    pub fn new(assets: Vec<ReleaseAsset>) -> Self {
        Self {
            assets,
            release_error: None,
            failing_asset: None,
            requested_tags: Mutex::new(Vec::new()),
            downloaded: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_release(mut self, error: fn() -> FetchError) -> Self {
        self.release_error = Some(error);
        self
    }

    pub fn failing_asset(mut self, id: u64) -> Self {
        self.failing_asset = Some(id);
        self
    }

    pub fn content_of(name: &str) -> String {
        format!("content of {name}")
    }

    pub fn downloaded(&self) -> Vec<u64> {
        self.downloaded.lock().unwrap().clone()
    }
}

impl ReleaseClient for MockReleaseClient {
    async fn release(&self, tag: Option<&str>) -> Result<Release, FetchError> {
        self.requested_tags
            .lock()
            .unwrap()
            .push(tag.map(str::to_string));
        match self.release_error {
            Some(error) => Err(error()),
            None => Ok(Release {
                assets: self.assets.clone(),
            }),
        }
    }

    async fn download_asset(
        &self,
        asset: &ReleaseAsset,
        destination_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        if self.failing_asset == Some(asset.id) {
            return Err(FetchError::download(&asset.name, None));
        }
        let path = destination_dir.join(&asset.name);
        std::fs::write(&path, Self::content_of(&asset.name))
            .map_err(|e| FetchError::io(&path, e))?;
        self.downloaded.lock().unwrap().push(asset.id);
        Ok(path)
    }
}
