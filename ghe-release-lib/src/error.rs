use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a fetch can fail.
///
/// The `Display` text of each variant is what the automation host shows to the
/// user, so the wording is part of the contract.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to connect {url}")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("401 Unauthorized")]
    Unauthorized,

    #[error("404 Not Found")]
    NotFound,

    #[error("Failed to fetch release from {url}: {status}")]
    MetadataStatus { url: String, status: StatusCode },

    #[error("Failed to parse release from {url}")]
    InvalidRelease {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("There is no asset to download")]
    NoAssets,

    #[error("Failed to download {name}")]
    Download {
        name: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Refusing to write asset with unsafe name {name}")]
    UnsafeAssetName { name: String },

    #[error("Output path {} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Access token is not a valid HTTP header value")]
    InvalidToken,
}

impl FetchError {
    pub(crate) fn download(name: &str, source: Option<reqwest::Error>) -> Self {
        Self::Download {
            name: name.to_string(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_stable() {
        assert_eq!(FetchError::Unauthorized.to_string(), "401 Unauthorized");
        assert_eq!(FetchError::NotFound.to_string(), "404 Not Found");
        assert_eq!(
            FetchError::NoAssets.to_string(),
            "There is no asset to download"
        );
        assert_eq!(
            FetchError::download("a.tar.gz", None).to_string(),
            "Failed to download a.tar.gz"
        );
        assert_eq!(
            FetchError::MetadataStatus {
                url: "https://ghe.example.com/api/v3/repos/o/r/releases/latest".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }
            .to_string(),
            "Failed to fetch release from https://ghe.example.com/api/v3/repos/o/r/releases/latest: 500 Internal Server Error"
        );
    }

    #[test]
    fn test_path_messages() {
        let err = FetchError::NotADirectory {
            path: PathBuf::from("/nowhere/out"),
        };
        assert_eq!(err.to_string(), "Output path /nowhere/out is not a directory");

        let err = FetchError::io(
            "/tmp/out/a.zip",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write /tmp/out/a.zip: denied");
    }
}
