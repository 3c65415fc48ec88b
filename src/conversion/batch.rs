//! Directory mode: convert every dashboard under a set of directories

use crate::cli::path_mapping;
use crate::conversion::engine::{ConversionEngine, ConversionMetadata};
use crate::conversion::ConversionResult;
use crate::error::ConversionError;
use crate::parser::directory::{expand_dir_glob, find_json_files, find_matching_files};
use glob::Pattern;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory mode inputs
#[derive(Debug, Clone)]
pub struct BatchRequest<'a> {
    pub pattern: &'a str,
    pub output_dir: &'a Path,
    pub clean: Option<&'a str>,
    pub team: bool,
}

/// One converted dashboard
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub metadata: ConversionMetadata,
}

/// Outcome of a cleanup pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Outcome of a directory run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub directories: usize,
    pub converted: Vec<ConvertedFile>,
    pub cleanup: CleanupReport,
    /// Output paths written more than once in this run; the last write wins
    pub overwritten: Vec<PathBuf>,
}

/// Delete every file under `output_dir` whose base name matches `pattern`.
///
/// Walking or matching failures abort. A file that cannot be removed is
/// logged and recorded in `failed`, and the pass carries on.
pub fn clean_output_dir(output_dir: &Path, pattern: &str) -> ConversionResult<CleanupReport> {
    clean_with(output_dir, pattern, |path| std::fs::remove_file(path))
}

fn clean_with<F>(output_dir: &Path, pattern: &str, remove: F) -> ConversionResult<CleanupReport>
where
    F: Fn(&Path) -> io::Result<()>,
{
    let pattern = Pattern::new(pattern).map_err(|e| {
        ConversionError::walk(output_dir, format!("invalid clean pattern '{}': {}", pattern, e))
    })?;

    let mut report = CleanupReport::default();
    for path in find_matching_files(output_dir, &pattern)? {
        match remove(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed stale manifest");
                report.removed.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not remove stale manifest");
                report.failed.push(path);
            }
        }
    }

    Ok(report)
}

/// Run the single-file pipeline over every `.json` file the request covers.
///
/// Stops at the first error.
pub fn convert_directories(
    engine: &ConversionEngine,
    request: &BatchRequest<'_>,
) -> ConversionResult<BatchSummary> {
    let mut summary = BatchSummary::default();

    if let Some(clean) = request.clean {
        summary.cleanup = clean_output_dir(request.output_dir, clean)?;
        info!(
            removed = summary.cleanup.removed.len(),
            failed = summary.cleanup.failed.len(),
            "cleaned output directory"
        );
    }

    let mut written = HashSet::new();
    let dirs = expand_dir_glob(request.pattern)?;
    if dirs.is_empty() {
        warn!(pattern = request.pattern, "no directories matched");
    }

    for dir in dirs {
        summary.directories += 1;
        let files = find_json_files(&dir)?;
        debug!(dir = %dir.display(), files = files.len(), "scanning dashboard directory");

        for input in files {
            let output = path_mapping::batch_output_path(&input, request.output_dir);
            let name = if request.team {
                path_mapping::team_configmap_name(&input)
            } else {
                path_mapping::default_configmap_name(&input)
            };

            let manifest = engine.convert_file(&input, &output, &name)?;
            if !written.insert(output.clone()) {
                warn!(
                    input = %input.display(),
                    output = %output.display(),
                    "output already written in this run, overwriting"
                );
                summary.overwritten.push(output.clone());
            }
            info!(
                input = %input.display(),
                output = %output.display(),
                "converted {}",
                manifest.metadata.dashboard
            );

            summary.converted.push(ConvertedFile {
                input,
                output,
                metadata: manifest.metadata,
            });
        }
    }

    Ok(summary)
}
