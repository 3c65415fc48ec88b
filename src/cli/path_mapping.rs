use std::path::{Path, PathBuf};

/// Suffix appended to manifests written in directory mode
pub const BATCH_MANIFEST_SUFFIX: &str = ".db.configmap.yaml";

/// File name of the input, e.g. `my_dashboard.json`
pub fn data_key(input_file: &Path) -> String {
    input_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name of the input with the `.json` suffix stripped
pub fn base_name(input_file: &Path) -> String {
    let name = data_key(input_file);
    match name.strip_suffix(".json") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

/// Default single-file output path: `<base>.yaml` in the working directory
pub fn default_output_path(input_file: &Path) -> PathBuf {
    PathBuf::from(format!("{}.yaml", base_name(input_file)))
}

/// Map an input JSON file to its manifest path inside `output_dir`
pub fn batch_output_path(input_file: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{}", base_name(input_file), BATCH_MANIFEST_SUFFIX))
}

/// Default ConfigMap name: the base name with underscores turned into hyphens
pub fn default_configmap_name(input_file: &Path) -> String {
    base_name(input_file).replace('_', "-")
}

/// ConfigMap name prefixed with the directory that holds the dashboard
pub fn team_configmap_name(input_file: &Path) -> String {
    let name = default_configmap_name(input_file);
    match team_name(input_file) {
        Some(team) => format!("{}-{}", team, name),
        None => name,
    }
}

fn team_name(input_file: &Path) -> Option<String> {
    input_file
        .parent()
        .and_then(Path::file_name)
        .map(|dir| dir.to_string_lossy().into_owned())
}
