//! Filesystem data lake for analyzed matches.
//!
//! - Results files (one pretty JSON report per match)
//! - JSONL history (matches, performances, players, teams, maps, reviews)
//! - Parquet export of performances for analytics

pub mod history;
pub mod jsonl;
pub mod parquet;
pub mod results;

use std::path::PathBuf;
use thiserror::Error;

pub use history::{HistoryStore, RecordOutcome};
pub use results::{read_results_file, results_file_name, write_results_file};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),
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

    /// Full match reports, one `<match id>.json` each.
    pub fn results_dir(&self) -> PathBuf {
        self.data_dir.join("results")
    }

    pub fn history_dir(&self) -> PathBuf {
        self.data_dir.join("history")
    }

    pub fn parquet_dir(&self) -> PathBuf {
        self.data_dir.join("parquet")
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

        assert_eq!(config.results_dir(), PathBuf::from("/data/results"));
        assert_eq!(config.history_dir(), PathBuf::from("/data/history"));
        assert_eq!(config.parquet_dir(), PathBuf::from("/data/parquet"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
