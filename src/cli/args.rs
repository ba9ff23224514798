//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{ArgAction, Parser};

/// ae-preflight - Check that a host is ready for an Anaconda Enterprise install.
///
/// Results are written to a report file (results.txt by default). Set
/// AE_PREFLIGHT_CONFIG to a YAML or JSON file to override the built-in tables.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ae-preflight")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Probe ports on this interface only (default: all physical interfaces)
    #[arg(short, long, value_name = "NAME")]
    pub interface: Option<String>,

    /// Show diagnostics while checking (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
