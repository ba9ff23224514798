//! Configuration validation.
//!
//! Rejects configurations that would make a run meaningless, such as an
//! empty port list or a zero timeout.

use crate::config::schema::PreflightConfig;
use crate::error::{PreflightError, Result};

/// Validate a loaded configuration, returning the first problem found.
pub fn validate(config: &PreflightConfig) -> Result<()> {
    let errors = validation_errors(config);
    match errors.into_iter().next() {
        Some(message) => Err(PreflightError::ConfigValidationError { message }),
        None => Ok(()),
    }
}

/// Collect every validation problem in a configuration.
pub fn validation_errors(config: &PreflightConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.os_support.is_empty() {
        errors.push("os_support must list at least one distribution family".to_string());
    }
    for (family, support) in &config.os_support {
        if support.versions.is_empty() {
            errors.push(format!("os_support.{} has no supported versions", family));
        }
    }

    if config.ports.ports.is_empty() {
        errors.push("ports.ports must contain at least one port".to_string());
    }
    if config.ports.timeout_secs == 0 {
        errors.push("ports.timeout_secs must be greater than zero".to_string());
    }
    if config.command_timeout_secs == 0 {
        errors.push("command_timeout_secs must be greater than zero".to_string());
    }

    if config.resources.minimum_memory_gb < 0.0 {
        errors.push("resources.minimum_memory_gb cannot be negative".to_string());
    }
    if config.mounts.root_recommended_gb < 0.0 {
        errors.push("mounts.root_recommended_gb cannot be negative".to_string());
    }
    for rule in &config.mounts.rules {
        if !rule.prefix.starts_with('/') {
            errors.push(format!(
                "mounts.rules prefix '{}' must be an absolute path",
                rule.prefix
            ));
        }
    }
    for candidate in &config.mounts.candidates {
        if !candidate.is_absolute() {
            errors.push(format!(
                "mounts.candidates entry '{}' must be an absolute path",
                candidate.display()
            ));
        }
    }

    if config.report_path.as_os_str().is_empty() {
        errors.push("report_path cannot be empty".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&PreflightConfig::default()).is_ok());
    }

    #[test]
    fn empty_os_support_is_rejected() {
        let mut config = PreflightConfig::default();
        config.os_support.clear();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("os_support"));
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let mut config = PreflightConfig::default();
        config.ports.timeout_secs = 0;
        config.command_timeout_secs = 0;
        let errors = validation_errors(&config);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn relative_mount_candidate_is_rejected() {
        let mut config = PreflightConfig::default();
        config.mounts.candidates.push(PathBuf::from("opt/anaconda"));
        let errors = validation_errors(&config);
        assert!(errors.iter().any(|e| e.contains("opt/anaconda")));
    }

    #[test]
    fn family_without_versions_is_rejected() {
        let mut config = PreflightConfig::default();
        config
            .os_support
            .get_mut("debian")
            .unwrap()
            .versions
            .clear();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("debian"));
    }
}
