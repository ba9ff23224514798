//! Command-line interface.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`command`] - The [`Command`] trait and [`CommandResult`]
//! - [`run`] - The preflight run

pub mod args;
pub mod command;
pub mod run;

pub use args::Cli;
pub use command::{Command, CommandResult};
pub use run::{exit_code, RunCommand};

use crate::config::load_config;
use crate::error::Result;
use crate::ui::UserInterface;

/// Load configuration and run the checks for parsed arguments.
pub fn dispatch(cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
    let config = load_config()?;
    RunCommand::new(config, cli.interface.clone()).execute(ui)
}
