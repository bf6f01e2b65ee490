//!
//! File Loader Utility
//!
//! Loads the JSON documents the reference adapters read from disk (the answers dictionary and
//! exported sheets). Files are checked for existence, type and size before they are parsed.
//!
//! # Error Handling
//!
//! Detailed causes are logged with `tracing::error!`; callers receive a short [`MarkerError`]
//! (`IoError` or `InvalidJson`) that is safe to show to a teacher.

use crate::error::MarkerError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

/// Maximum allowed size for JSON files.
pub const MAX_JSON_SIZE: u64 = 2 * 1024 * 1024; // 2MB

/// Checks that a file exists, is a file, and (optionally) does not exceed a maximum size.
///
/// # Errors
///
/// Returns [`MarkerError::IoError`] if the file is missing, not a file, unreadable, or too large.
pub fn check_file(path: &Path, max_size: Option<u64>) -> Result<(), MarkerError> {
    if !path.exists() {
        error!("File not found: {}", path.display());
        return Err(MarkerError::IoError("File not found".to_string()));
    }

    if !path.is_file() {
        error!("Not a file: {}", path.display());
        return Err(MarkerError::IoError("Invalid file type".to_string()));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        error!("File unreadable: {} - {}", path.display(), e);
        MarkerError::IoError("File unreadable".to_string())
    })?;

    if let Some(max) = max_size {
        if metadata.len() > max {
            error!(
                "File too large: {} ({} bytes, max {} bytes)",
                path.display(),
                metadata.len(),
                max
            );
            return Err(MarkerError::IoError("File too large".to_string()));
        }
    }

    Ok(())
}

/// Reads and parses a JSON file no larger than [`MAX_JSON_SIZE`].
pub fn load_json_file(path: &Path) -> Result<Value, MarkerError> {
    check_file(path, Some(MAX_JSON_SIZE))?;

    let bytes = fs::read(path).map_err(|e| {
        error!("Failed to read JSON file {}: {}", path.display(), e);
        MarkerError::IoError("File unreadable".to_string())
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        error!("Invalid JSON in file {}: {}", path.display(), e);
        MarkerError::InvalidJson(format!("Failed to parse {}", display_name(path)))
    })
}

/// Returns the first candidate that exists on disk, if any.
pub fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|p| p.exists())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "answers_dictionary.json", br#"{"A1 0.1": {}}"#);
        let value = load_json_file(&path).unwrap();
        assert!(value.get("A1 0.1").is_some());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err, MarkerError::IoError("File not found".to_string()));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let err = check_file(dir.path(), None).unwrap_err();
        assert_eq!(err, MarkerError::IoError("Invalid file type".to_string()));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "big.json", &vec![b' '; 64]);
        let err = check_file(&path, Some(16)).unwrap_err();
        assert_eq!(err, MarkerError::IoError("File too large".to_string()));
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.json", b"{\"teil1\": ");
        let err = load_json_file(&path).unwrap_err();
        assert_eq!(
            err,
            MarkerError::InvalidJson("Failed to parse broken.json".to_string())
        );
    }

    #[test]
    fn test_first_existing_respects_order() {
        let dir = TempDir::new().unwrap();
        let second = write_file(&dir, "b.json", b"{}");
        let third = write_file(&dir, "c.json", b"{}");
        let candidates = vec![dir.path().join("a.json"), second.clone(), third];
        assert_eq!(first_existing(&candidates), Some(&second));
        assert_eq!(first_existing(&[dir.path().join("zz.json")]), None);
    }
}
