use crate::error::FetchError;
use serde::Serialize;
use std::path::Path;

/// Result record handed back to the automation host.
///
/// Serializes as `{"changed": false, "msg": "..."}`, with `"failed": true`
/// added for failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Always `false`: downloading again is not treated as a change.
    pub changed: bool,

    #[serde(rename = "msg")]
    pub message: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl Outcome {
    pub fn completed(destination_dir: &Path) -> Self {
        Self {
            changed: false,
            message: format!(
                "Completed to download assets on {}",
                destination_dir.display()
            ),
            failed: false,
        }
    }

    /// Check mode: nothing was attempted.
    pub fn skipped() -> Self {
        Self {
            changed: false,
            message: String::new(),
            failed: false,
        }
    }

    pub fn failed(error: &FetchError) -> Self {
        Self {
            changed: false,
            message: error.to_string(),
            failed: true,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_json() {
        let outcome = Outcome::completed(Path::new("/srv/assets"));
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"changed":false,"msg":"Completed to download assets on /srv/assets"}"#
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn test_failure_json() {
        let outcome = Outcome::failed(&FetchError::NoAssets);
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"changed":false,"msg":"There is no asset to download","failed":true}"#
        );
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_skipped_json() {
        assert_eq!(
            serde_json::to_string(&Outcome::skipped()).unwrap(),
            r#"{"changed":false,"msg":""}"#
        );
    }
}
