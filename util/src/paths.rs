use crate::config::AppConfig;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// File names searched for the answers dictionary when no explicit path is configured.
const DEFAULT_DICTIONARY_LOCATIONS: [&str; 3] = [
    "answers_dictionary.json",
    "data/answers_dictionary.json",
    "assets/answers_dictionary.json",
];

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global storage root (absolute), from `AppConfig::storage_root`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let root = AppConfig::global().storage_root.clone();
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Candidate locations for the answers dictionary, in lookup order.
///
/// An explicit `ANSWERS_DICTIONARY_PATH` wins outright; otherwise the
/// conventional locations under the storage root are tried.
pub fn answers_dictionary_candidates() -> Vec<PathBuf> {
    let explicit = AppConfig::global().answers_dictionary_path.trim().to_string();
    if !explicit.is_empty() {
        return vec![PathBuf::from(explicit)];
    }

    let root = storage_root();
    DEFAULT_DICTIONARY_LOCATIONS
        .iter()
        .map(|rel| root.join(rel))
        .collect()
}

/// Assignment ids come from teachers ("Lesen & Hören 0.1"), so anything
/// outside `[A-Za-z0-9._-]` is folded to `_` before touching the filesystem.
pub fn sanitize_assignment_id(assignment_id: &str) -> String {
    let cleaned: String = assignment_id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        cleaned
    }
}

/// `{STORAGE_ROOT}/assignments/{sanitized id}`
pub fn assignment_dir(assignment_id: &str) -> PathBuf {
    storage_root()
        .join("assignments")
        .join(sanitize_assignment_id(assignment_id))
}

/// `{STORAGE_ROOT}/assignments/{sanitized id}/marking.json`
pub fn marking_config_path(assignment_id: &str) -> PathBuf {
    assignment_dir(assignment_id).join("marking.json")
}
