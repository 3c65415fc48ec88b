//! Configuration options for dashboard to ConfigMap conversion

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Namespace used when none is given on the command line
pub const DEFAULT_NAMESPACE: &str = "monitoring";

/// Conversion options shared by single-file and directory mode
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Target namespace; empty omits the field from the manifest
    pub namespace: String,
    /// Embed compact (single-line) JSON instead of pretty-printed JSON
    pub compact: bool,
    /// Annotations added to the ConfigMap metadata
    pub annotations: BTreeMap<String, String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            compact: false,
            annotations: BTreeMap::new(),
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Enable/disable compact JSON
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Add a single annotation
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.annotations.keys().any(|key| key.trim().is_empty()) {
            return Err("Annotation keys must not be empty".to_string());
        }

        Ok(())
    }
}

/// Which pipeline to run
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Convert one dashboard file
    SingleFile {
        dashboard: PathBuf,
        /// Defaults to `<base>.yaml`
        output: Option<PathBuf>,
        /// Defaults to the base name with `_` replaced by `-`
        name: Option<String>,
    },
    /// Convert every dashboard under the directories matched by `pattern`
    Batch {
        pattern: String,
        output_dir: PathBuf,
        /// Base-name pattern of stale manifests to delete first
        clean: Option<String>,
        /// Prefix names with the parent directory name
        team: bool,
    },
}

/// Everything one invocation needs, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub conversion: ConversionConfig,
    pub mode: Mode,
}

impl RunConfig {
    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        self.conversion.validate()?;

        if let Mode::Batch {
            pattern,
            output_dir,
            clean,
            ..
        } = &self.mode
        {
            if pattern.trim().is_empty() {
                return Err("Directory pattern must not be empty".to_string());
            }
            if !output_dir.is_dir() {
                return Err(format!(
                    "Output directory does not exist: {}",
                    output_dir.display()
                ));
            }
            if let Some(clean) = clean {
                glob::Pattern::new(clean)
                    .map_err(|e| format!("Invalid clean pattern '{}': {}", clean, e))?;
            }
        }

        Ok(())
    }
}

/// Parse a `key=value` annotation argument
pub fn parse_annotation(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid annotation '{}': expected key=value", s))?;

    if key.trim().is_empty() {
        return Err(format!("invalid annotation '{}': empty key", s));
    }

    Ok((key.to_string(), value.to_string()))
}
