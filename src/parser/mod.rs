//! Dashboard loading and directory discovery module

pub mod directory;
pub mod filter;

use crate::error::{ConversionError, ConversionResult, ParseError, ParseResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A Grafana dashboard document read from disk
///
/// `data` is the full parsed document and is what ends up embedded in the
/// ConfigMap. The identifying fields are extracted best-effort for logging
/// and never validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub source: PathBuf,
    pub title: Option<String>,
    pub uid: Option<String>,
    pub version: Option<i64>,
    pub data: Value,
    pub source_size: u64,
}

impl Dashboard {
    /// Wrap an already parsed JSON document
    pub fn from_json(source: impl Into<PathBuf>, data: Value, source_size: u64) -> Self {
        let title = data.get("title").and_then(Value::as_str).map(str::to_string);
        let uid = data.get("uid").and_then(Value::as_str).map(str::to_string);
        let version = data.get("version").and_then(Value::as_i64);

        Self {
            source: source.into(),
            title,
            uid,
            version,
            data,
            source_size,
        }
    }

    /// Human-readable label for log lines
    pub fn description(&self) -> String {
        let label = match (&self.title, &self.uid) {
            (Some(title), Some(uid)) => format!("'{}' (uid {})", title, uid),
            (Some(title), None) => format!("'{}'", title),
            (None, Some(uid)) => format!("uid {}", uid),
            (None, None) => format!("{}", self.source.display()),
        };

        match self.version {
            Some(version) => format!("{} v{}", label, version),
            None => label,
        }
    }
}

/// Read and parse a dashboard JSON file
///
/// The `.json` suffix is checked before the file is touched.
pub fn load_dashboard(path: &Path) -> ConversionResult<Dashboard> {
    if !filter::has_json_suffix(path) {
        return Err(ConversionError::invalid_input_kind(path));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConversionError::io(path, e))?;
    let data = parse_dashboard_str(path, &content)?;

    let dashboard = Dashboard::from_json(path, data, content.len() as u64);
    debug!(
        path = %path.display(),
        bytes = dashboard.source_size,
        "loaded dashboard {}",
        dashboard.description()
    );

    Ok(dashboard)
}

/// Parse dashboard JSON text, attributing failures to `path`
pub fn parse_dashboard_str(path: &Path, content: &str) -> ParseResult<Value> {
    serde_json::from_str(content).map_err(|e| ParseError::from_json(path, &e))
}
