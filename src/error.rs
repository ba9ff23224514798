//! Error types for preflight operations.
//!
//! This module defines [`PreflightError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Gatherers return `PreflightError` and the engine turns every gatherer
//!   error into an `Unavailable` fact, so none of these abort a run
//! - Only configuration and report-writing errors reach `main`
//! - Report writing adds `anyhow` context to the I/O error before it is
//!   folded into [`PreflightError::ReportWriteFailed`]

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for preflight operations.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// External command could not be started or exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// External command did not finish in time and was killed.
    #[error("Command timed out after {timeout:?}: {command}")]
    CommandTimedOut { command: String, timeout: Duration },

    /// A data source returned something we could not make sense of.
    #[error("Could not parse {source_name}: {message}")]
    Unparseable {
        source_name: String,
        message: String,
    },

    /// Configuration file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The results report could not be written.
    #[error("Failed to write report to {path}: {message}")]
    ReportWriteFailed { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PreflightError {
    /// Shorthand for an [`PreflightError::Unparseable`] error.
    pub fn unparseable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unparseable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for preflight operations.
pub type Result<T> = std::result::Result<T, PreflightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = PreflightError::CommandFailed {
            command: "sysctl net.ipv4.ip_forward".into(),
            code: Some(255),
        };
        let msg = err.to_string();
        assert!(msg.contains("sysctl net.ipv4.ip_forward"));
        assert!(msg.contains("255"));
    }

    #[test]
    fn command_timed_out_displays_command() {
        let err = PreflightError::CommandTimedOut {
            command: "lsmod".into(),
            timeout: Duration::from_secs(10),
        };
        let msg = err.to_string();
        assert!(msg.contains("lsmod"));
        assert!(msg.contains("10s"));
    }

    #[test]
    fn unparseable_displays_source_and_message() {
        let err = PreflightError::unparseable("/proc/meminfo", "no MemTotal line");
        let msg = err.to_string();
        assert!(msg.contains("/proc/meminfo"));
        assert!(msg.contains("no MemTotal line"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = PreflightError::ConfigNotFound {
            path: PathBuf::from("/etc/ae-preflight.yml"),
        };
        assert!(err.to_string().contains("/etc/ae-preflight.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PreflightError::ConfigParseError {
            path: PathBuf::from("/tmp/preflight.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/preflight.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn report_write_failed_displays_path() {
        let err = PreflightError::ReportWriteFailed {
            path: PathBuf::from("results.txt"),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("results.txt"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PreflightError = io_err.into();
        assert!(matches!(err, PreflightError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PreflightError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
