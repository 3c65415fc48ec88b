//! Grafana dashboard to Kubernetes ConfigMap converter
//!
//! Reads dashboard JSON files, re-encodes them compact or pretty, and wraps
//! them in a ConfigMap manifest labelled for grafana's dashboard sidecar.
//! Works on a single file or on every dashboard under a set of directories.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;

// Re-export commonly used types
pub use conversion::batch::{BatchRequest, BatchSummary, ConvertedFile};
pub use conversion::{ConfigMap, ConversionConfig, ConversionEngine, ManifestData, Mode, RunConfig};
pub use error::{ConversionError, ConversionResult, ParseError};
pub use parser::{load_dashboard, Dashboard};

use cli::path_mapping;
use std::path::Path;

/// Render the ConfigMap YAML for a dashboard document without touching disk
///
/// `file_name` is the data key, e.g. `my_dashboard.json`.
pub fn convert_dashboard(
    json: &serde_json::Value,
    file_name: &str,
    name: &str,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    let dashboard = Dashboard::from_json(file_name, json.clone(), 0);
    let engine = ConversionEngine::new(config.clone());
    Ok(engine.convert(&dashboard, name)?.content)
}

/// Run one invocation: a single file or a directory batch
pub fn run(config: &RunConfig) -> ConversionResult<BatchSummary> {
    let engine = ConversionEngine::new(config.conversion.clone());

    match &config.mode {
        Mode::SingleFile {
            dashboard,
            output,
            name,
        } => {
            let converted = convert_single_file(&engine, dashboard, output.as_deref(), name.as_deref())?;
            Ok(BatchSummary {
                converted: vec![converted],
                ..Default::default()
            })
        }
        Mode::Batch {
            pattern,
            output_dir,
            clean,
            team,
        } => {
            let request = BatchRequest {
                pattern,
                output_dir,
                clean: clean.as_deref(),
                team: *team,
            };
            conversion::batch::convert_directories(&engine, &request)
        }
    }
}

fn convert_single_file(
    engine: &ConversionEngine,
    dashboard: &Path,
    output: Option<&Path>,
    name: Option<&str>,
) -> ConversionResult<ConvertedFile> {
    // Reject non-JSON inputs before resolving anything
    if !parser::filter::has_json_suffix(dashboard) {
        return Err(ConversionError::invalid_input_kind(dashboard));
    }

    let output = match output {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => path_mapping::default_output_path(dashboard),
    };
    let name = match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => path_mapping::default_configmap_name(dashboard),
    };

    let manifest = engine.convert_file(dashboard, &output, &name)?;

    Ok(ConvertedFile {
        input: dashboard.to_path_buf(),
        output,
        metadata: manifest.metadata,
    })
}
