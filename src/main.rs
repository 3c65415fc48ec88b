use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use dashcm::cli::{self, Args, CliConfig, CliUtils};
use dashcm::{BatchSummary, ConversionError};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ConversionError>() {
                Some(conversion_err) => cli::handle_error(conversion_err),
                None => CliUtils::show_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG wins over --verbose/--quiet
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli::log_level(args)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(CliUtils::should_use_color())
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = CliConfig::from_args(args)?;
    let summary = dashcm::run(&config.run_config)?;

    report(&config, &summary);
    Ok(())
}

fn report(config: &CliConfig, summary: &BatchSummary) {
    let quiet = config.is_quiet();

    for path in &summary.cleanup.removed {
        CliUtils::show_success(&format!("Removed {}", path.display()), quiet);
    }

    for file in &summary.converted {
        CliUtils::show_success(
            &format!("{} -> {}", file.input.display(), file.output.display()),
            quiet,
        );

        if config.want_stats() && !quiet {
            println!("  ConfigMap: {}", file.metadata.configmap_name);
            println!("  Dashboard: {}", file.metadata.dashboard);
            println!(
                "  Input size: {}",
                CliUtils::format_file_size(file.metadata.input_size)
            );
            println!(
                "  Output size: {}",
                CliUtils::format_file_size(file.metadata.output_size)
            );
            println!(
                "  Processing time: {}",
                CliUtils::format_duration(Duration::from_millis(file.metadata.processing_time_ms))
            );
        }
    }

    if !quiet && summary.directories > 0 {
        println!(
            "Converted {} dashboards from {} directories",
            summary.converted.len(),
            summary.directories
        );
    }
}
