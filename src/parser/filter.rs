use std::path::Path;

/// Return true if the path name ends in `.json` (case-sensitive)
pub fn has_json_suffix(path: &Path) -> bool {
    path.to_str().is_some_and(|s| s.ends_with(".json"))
}
