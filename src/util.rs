//! Shared filesystem helpers for the checkers

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Immediate subdirectories of `dir` as `(name, path)`, sorted by name.
/// Names that are not valid UTF-8 are converted lossily.
pub fn list_subdirs(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if file_name.to_str().is_none() {
            warn!("Directory name is not valid UTF-8: {}", path.display());
        }
        subdirs.push((name.into_owned(), path));
    }
    subdirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(subdirs)
}

/// Final path segment of a skill reference (`skills/register/` -> `register`).
pub fn skill_name(reference: &str) -> String {
    Path::new(reference)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(reference)
        .to_string()
}
