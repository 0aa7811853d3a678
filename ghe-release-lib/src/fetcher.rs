use crate::config::FetchParams;
use crate::error::FetchError;
use crate::github::{GitHubClient, ReleaseAsset};
use crate::outcome::Outcome;
use crate::release_client::ReleaseClient;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Picks the assets to download, keeping the order of the release.
///
/// Without a filter every asset is selected. With one, only assets whose name
/// appears verbatim in `asset_names` are kept; names that match nothing are
/// ignored.
pub fn select_assets<'a>(
    assets: &'a [ReleaseAsset],
    asset_names: Option<&[String]>,
) -> Result<Vec<&'a ReleaseAsset>, FetchError> {
    let selected: Vec<_> = assets
        .iter()
        .filter(|asset| asset_names.is_none_or(|names| names.contains(&asset.name)))
        .collect();

    if selected.is_empty() {
        return Err(FetchError::NoAssets);
    }
    Ok(selected)
}

/// Resolves the release, then downloads the selected assets one after the
/// other into `destination_dir`. The first failure aborts the run; files
/// already written are left in place.
pub async fn download_release<C: ReleaseClient>(
    client: &C,
    tag: Option<&str>,
    asset_names: Option<&[String]>,
    destination_dir: &Path,
) -> Result<Vec<PathBuf>, FetchError> {
    match tag {
        Some(tag) => tracing::info!("Resolving release {tag}..."),
        None => tracing::info!("Resolving latest release..."),
    }
    let release = client.release(tag).await?;

    let selected = select_assets(&release.assets, asset_names)?;
    tracing::debug!(
        "Selected {} of {} assets",
        selected.len(),
        release.assets.len()
    );

    if !destination_dir.is_dir() {
        return Err(FetchError::NotADirectory {
            path: destination_dir.to_path_buf(),
        });
    }

    let mut written = Vec::with_capacity(selected.len());
    for asset in selected {
        let path = client.download_asset(asset, destination_dir).await?;
        tracing::info!("Downloaded {}", asset.name);
        written.push(path);
    }
    Ok(written)
}

/// Runs one invocation end to end and folds the result into the record the
/// automation host expects.
pub async fn run(params: &FetchParams) -> Outcome {
    if params.check_mode {
        tracing::info!("Check mode: nothing downloaded");
        return Outcome::skipped();
    }

    match fetch(params).await {
        Ok(destination_dir) => Outcome::completed(&destination_dir),
        Err(e) => {
            let mut cause = e.source();
            while let Some(err) = cause {
                tracing::debug!("Caused by: {err}");
                cause = err.source();
            }
            Outcome::failed(&e)
        }
    }
}

async fn fetch(params: &FetchParams) -> Result<PathBuf, FetchError> {
    let destination_dir = params.destination_dir()?;
    let client = GitHubClient::new(params)?;
    download_release(
        &client,
        params.tag.as_deref(),
        params.asset_names.as_deref(),
        &destination_dir,
    )
    .await?;
    Ok(destination_dir)
}
