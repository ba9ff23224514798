//! ae-preflight - Pre-installation checks for Anaconda Enterprise hosts.
//!
//! ae-preflight inspects a Linux host, evaluates it against the install
//! requirements and writes a sectioned report ending in an overall
//! `PASS`, `WARN` or `FAIL`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration tables, loading and validation
//! - [`host`] - Distribution family and version detection
//! - [`system`] - Host collaborators (files, commands, mounts, processes, ports)
//! - [`gather`] - Fact gathering, one gatherer per domain
//! - [`facts`] - Raw fact types and the frozen snapshot
//! - [`checks`] - Pure evaluators, verdicts and the aggregator
//! - [`engine`] - Run orchestration
//! - [`report`] - The results report
//! - [`shell`] - External command execution
//! - [`ui`] - Spinner and terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use ae_preflight::checks::{aggregate::overall_result, OverallResult, Status};
//!
//! let overall = overall_result([Status::Pass, Status::Skipped, Status::Warn]);
//! assert_eq!(overall, OverallResult::Warn);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod facts;
pub mod gather;
pub mod host;
pub mod report;
pub mod shell;
pub mod system;
pub mod ui;

pub use error::{PreflightError, Result};
