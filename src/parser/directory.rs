use crate::error::{ConversionError, ConversionResult};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Expand a glob pattern into the directories it matches.
///
/// Matches that are not directories are skipped. An invalid pattern or an
/// unreadable match is an error.
pub fn expand_dir_glob(pattern: &str) -> ConversionResult<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|e| ConversionError::walk(pattern, format!("invalid directory pattern: {}", e)))?;

    let mut dirs = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| ConversionError::walk(e.path(), e.error().to_string()))?;
        if path.is_dir() {
            dirs.push(path);
        }
    }

    Ok(dirs)
}

/// Find JSON files under `dir`, recursively, in file name order.
pub fn find_json_files(dir: &Path) -> ConversionResult<Vec<PathBuf>> {
    collect_files(dir, |entry| {
        entry.path().extension().is_some_and(|ext| ext == "json")
    })
}

/// Find files under `dir` whose base name matches `pattern`.
pub fn find_matching_files(dir: &Path, pattern: &Pattern) -> ConversionResult<Vec<PathBuf>> {
    collect_files(dir, |entry| {
        entry.file_name().to_str().is_some_and(|name| pattern.matches(name))
    })
}

fn collect_files<F>(dir: &Path, keep: F) -> ConversionResult<Vec<PathBuf>>
where
    F: Fn(&DirEntry) -> bool,
{
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ConversionError::walk(path, e.to_string())
        })?;

        if entry.file_type().is_file() && keep(&entry) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
