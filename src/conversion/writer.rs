//! Manifest serialization and output

use crate::conversion::engine::ConfigMap;
use crate::error::{ConversionError, ConversionResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Serialize a ConfigMap to YAML text
pub fn to_yaml(configmap: &ConfigMap) -> ConversionResult<String> {
    serde_yaml::to_string(configmap).map_err(|e| ConversionError::serialize(e.to_string()))
}

/// Create or truncate `path` and write `content` to it.
///
/// The file is created with mode 0666 before the umask is applied. There is
/// no atomic replace: a failed write can leave a truncated file behind.
pub fn write_manifest(path: &Path, content: &str) -> ConversionResult<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }

    let mut file = options.open(path).map_err(|e| ConversionError::io(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| ConversionError::io(path, e))?;

    Ok(())
}
