use crate::config::{FetchParams, Token};
use crate::error::FetchError;
use crate::logging::progress_bar_style;
use crate::release_client::ReleaseClient;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const RELEASE_MEDIA_TYPE: &str = "application/vnd.github+json";
const ASSET_MEDIA_TYPE: &str = "application/octet-stream";

/// A release as returned by the REST API. Only the asset list is used.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub assets: Vec<ReleaseAsset>,
}

/// A release asset. Does not contain all fields.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
}

impl ReleaseAsset {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

pub struct GitHubClient {
    /// `{url}/api/v3/repos/{owner}/{repo}`
    repo_endpoint: String,
    authorization: HeaderValue,
    client: Client,
}

impl ReleaseClient for GitHubClient {
    async fn release(&self, tag: Option<&str>) -> Result<Release, FetchError> {
        let url = self.release_url(tag);
        tracing::debug!("Requesting release metadata from {url}");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, RELEASE_MEDIA_TYPE)
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await
            .map_err(|source| FetchError::Connectivity {
                url: url.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            status if !status.is_success() => {
                return Err(FetchError::MetadataStatus { url, status });
            }
            _ => {}
        }

        response
            .json::<Release>()
            .await
            .map_err(|source| FetchError::InvalidRelease { url, source })
    }

    #[instrument(skip_all, fields(asset = %asset.name))]
    async fn download_asset(
        &self,
        asset: &ReleaseAsset,
        destination_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        if !is_plain_file_name(&asset.name) {
            return Err(FetchError::UnsafeAssetName {
                name: asset.name.clone(),
            });
        }

        let url = format!("{}/releases/assets/{}", self.repo_endpoint, asset.id);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, ASSET_MEDIA_TYPE)
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await
            .map_err(|e| FetchError::download(&asset.name, Some(e)))?;

        if response.status() != StatusCode::OK {
            tracing::debug!("{} answered {}", url, response.status());
            return Err(FetchError::download(&asset.name, None));
        }

        let current_span = tracing::Span::current();
        if let Ok(style) = progress_bar_style() {
            current_span.pb_set_style(&style);
        }
        current_span.pb_set_length(response.content_length().unwrap_or(0));
        current_span.pb_set_message(&format!("Downloading {}...", asset.name));
        current_span.pb_set_finish_message(&format!("Downloading {}... Complete!", asset.name));

        let path = destination_dir.join(&asset.name);
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| FetchError::io(&path, e))?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        let streamed = async {
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| FetchError::download(&asset.name, Some(e)))?;
                file.write_all(&chunk)
                    .await
                    .map_err(|e| FetchError::io(&path, e))?;
                downloaded += chunk.len() as u64;
                current_span.pb_set_position(downloaded);
            }
            Ok::<(), FetchError>(())
        }
        .await;

        // Pending writes land on disk before any error is returned.
        let flushed = file.flush().await.map_err(|e| FetchError::io(&path, e));
        drop(file);
        streamed?;
        flushed?;

        tracing::debug!("Wrote {} bytes to {}", downloaded, path.display());
        Ok(path)
    }
}

impl GitHubClient {
    pub fn new(params: &FetchParams) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = params.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            repo_endpoint: format!(
                "{}/api/v3/repos/{}/{}",
                params.url.trim_end_matches('/'),
                params.owner,
                params.repo
            ),
            authorization: authorization_header(&params.token)?,
            client,
        })
    }

    fn release_url(&self, tag: Option<&str>) -> String {
        match tag {
            Some(tag) => format!("{}/releases/tags/{}", self.repo_endpoint, tag),
            None => format!("{}/releases/latest", self.repo_endpoint),
        }
    }
}

fn authorization_header(token: &Token) -> Result<HeaderValue, FetchError> {
    let mut value = HeaderValue::from_str(&format!("token {}", token.expose()))
        .map_err(|_| FetchError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Asset names become file names inside the destination directory, so they
/// must not be able to point anywhere else.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
