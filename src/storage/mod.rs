//! Filesystem data lake operations.
//!
//! Match records and projects are stored as JSONL, partitioned by TCG:
//! `<data_dir>/normalized/<tcg_id>/{matches,projects}.jsonl`.

mod jsonl;
mod store;

pub use jsonl::*;
pub use store::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TCG id: {0:?}")]
    InvalidTcgId(String),
}

/// TCG ids name a directory under the data lake; only ASCII letters, digits,
/// `-` and `_` are accepted so an id can never escape it.
pub fn validate_tcg_id(tcg_id: &str) -> Result<(), StorageError> {
    let ok = !tcg_id.is_empty()
        && tcg_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidTcgId(tcg_id.to_string()))
    }
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn normalized_dir(&self) -> PathBuf {
        self.data_dir.join("normalized")
    }

    /// Partition directory for one TCG.
    pub fn tcg_dir(&self, tcg_id: &str) -> Result<PathBuf, StorageError> {
        validate_tcg_id(tcg_id)?;
        Ok(self.normalized_dir().join(tcg_id))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.normalized_dir(), PathBuf::from("/data/normalized"));
        assert_eq!(
            config.tcg_dir("riftbound").unwrap(),
            PathBuf::from("/data/normalized/riftbound")
        );
    }

    #[test]
    fn test_tcg_dir_rejects_escaping_ids() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        for bad in ["", "..", "../x", "a/b", "a\\b", "/etc"] {
            assert!(matches!(
                config.tcg_dir(bad),
                Err(StorageError::InvalidTcgId(_))
            ));
        }
        assert!(config.tcg_dir("one_piece-2").is_ok());
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
