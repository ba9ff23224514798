//! ae-preflight CLI entry point.

use std::process::ExitCode;

use ae_preflight::cli::{dispatch, Cli};
use ae_preflight::ui::{create_ui, OutputMode};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `-v` sets DEBUG, `-vv` sets TRACE
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ae_preflight=warn")),
        1 => EnvFilter::new("ae_preflight=debug"),
        _ => EnvFilter::new("ae_preflight=trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("ae-preflight starting with args: {:?}", cli);

    let mut ui = create_ui(OutputMode::from_verbosity(cli.verbose));

    match dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
