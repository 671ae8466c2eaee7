//! Per-match results files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::StorageError;
use crate::models::MatchResult;

/// `matchAnalysisResults_<unix seconds>.json`
pub fn results_file_name(timestamp: i64) -> String {
    format!("matchAnalysisResults_{}.json", timestamp)
}

/// Write a finalized match as pretty JSON into `dir`.
pub fn write_results_file(
    dir: &Path,
    result: &MatchResult,
    timestamp: i64,
) -> Result<PathBuf, StorageError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(results_file_name(timestamp));
    fs::write(&path, serde_json::to_string_pretty(result)?)?;
    info!("Match analysis saved to {}", path.display());
    Ok(path)
}

pub fn read_results_file(path: &Path) -> Result<MatchResult, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_results_file_name() {
        assert_eq!(
            results_file_name(1726300800),
            "matchAnalysisResults_1726300800.json"
        );
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let result = MatchResult::new("Axis Team", "Allies Team", "Foy", "2024-09-14");

        let path = write_results_file(temp_dir.path(), &result, 42).unwrap();
        assert!(path.ends_with("matchAnalysisResults_42.json"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Match Date\": \"2024-09-14\""));
        assert_eq!(read_results_file(&path).unwrap(), result);
    }

    #[test]
    fn test_read_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_results_file(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StorageError::PathNotFound(_)));
    }
}
