//! Command-line interface module

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::conversion::config::parse_annotation;
use crate::conversion::{ConversionConfig, ConversionResult, Mode, RunConfig, DEFAULT_NAMESPACE};
use crate::error::ConversionError;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "dashcm")]
#[command(about = "Convert Grafana dashboard JSON into Kubernetes ConfigMap manifests")]
#[command(version)]
#[command(long_about = None)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["dashboard_file", "dashboard_dir"])
))]
pub struct Args {
    /// Grafana dashboard JSON file to convert
    #[arg(short = 'f', long = "file.dashboard", value_name = "FILE")]
    pub dashboard_file: Option<PathBuf>,

    /// Output file for the dashboard configmap (default: <name>.yaml)
    #[arg(short = 'o', long = "file.output", value_name = "FILE", requires = "dashboard_file")]
    pub output: Option<PathBuf>,

    /// Embed compact JSON in the ConfigMap
    #[arg(short = 'c', long = "file.compact")]
    pub compact: bool,

    /// Dashboard configmap name (default: dashboard file basename)
    #[arg(short = 'n', long = "dashboard.name", requires = "dashboard_file")]
    pub name: Option<String>,

    /// Annotation to add to the dashboard configmap (repeatable)
    #[arg(short = 'a', long = "k8s.annotations", value_name = "KEY=VALUE", value_parser = parse_annotation)]
    pub annotations: Vec<(String, String)>,

    /// Kubernetes namespace for the configmap (empty to omit)
    #[arg(short = 'N', long = "k8s.namespace", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Glob matching directories of dashboard JSON files
    #[arg(short = 'd', long = "dir.dashboard", value_name = "GLOB", requires = "output_dir")]
    pub dashboard_dir: Option<String>,

    /// Existing directory the configmaps are written to
    #[arg(short = 'm', long = "dir.output", value_name = "DIR", requires = "dashboard_dir")]
    pub output_dir: Option<PathBuf>,

    /// Delete files in the output directory matching this pattern first
    #[arg(long = "dir.clean", value_name = "PATTERN", requires = "dashboard_dir")]
    pub clean: Option<String>,

    /// Prefix configmap names with the dashboard's parent directory name
    #[arg(long = "dashboard.team", requires = "dashboard_dir")]
    pub team: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub run_config: RunConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let run_config = Self::create_run_config(&args)?;

        Ok(Self { args, run_config })
    }

    /// Create the run configuration from CLI arguments
    fn create_run_config(args: &Args) -> ConversionResult<RunConfig> {
        let conversion = ConversionConfig {
            namespace: args.namespace.clone(),
            compact: args.compact,
            annotations: args.annotations.iter().cloned().collect(),
        };

        let mode = match (&args.dashboard_file, &args.dashboard_dir) {
            (Some(dashboard), None) => Mode::SingleFile {
                dashboard: dashboard.clone(),
                output: args.output.clone(),
                name: args.name.clone(),
            },
            (None, Some(pattern)) => {
                let output_dir = args.output_dir.clone().ok_or_else(|| {
                    ConversionError::configuration(
                        "--dir.output is required with --dir.dashboard".to_string(),
                    )
                })?;
                Mode::Batch {
                    pattern: pattern.clone(),
                    output_dir,
                    clean: args.clean.clone(),
                    team: args.team,
                }
            }
            _ => {
                return Err(ConversionError::configuration(
                    "exactly one of --file.dashboard or --dir.dashboard is required".to_string(),
                ))
            }
        };

        let config = RunConfig { conversion, mode };

        // Validate configuration
        config.validate().map_err(ConversionError::configuration)?;

        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Default log level for this invocation
    pub fn log_level(&self) -> &'static str {
        log_level(&self.args)
    }
}

/// Default log level implied by `--verbose` / `--quiet`
pub fn log_level(args: &Args) -> &'static str {
    if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
        }
    }

    /// Show an error message; printed even when logging is filtered out
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Whether log output on stderr should carry ANSI colors
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stderr) && std::env::var_os("NO_COLOR").is_none()
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    debug!(error = ?error, "conversion failed");
    CliUtils::show_error(&error.user_message());

    match error {
        ConversionError::InvalidInputKind { .. } => {
            eprintln!("\nTip: --file.dashboard expects a file ending in .json");
        }
        ConversionError::Walk { .. } => {
            eprintln!("\nTip: check the --dir.dashboard pattern and directory permissions");
        }
        _ => {}
    }
}
