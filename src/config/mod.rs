//! Configuration for preflight runs.
//!
//! This module handles:
//! - Schema definitions and built-in tables in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use ae_preflight::config::{PreflightConfig, validate};
//!
//! let config = PreflightConfig::default();
//! validate(&config).unwrap();
//! assert_eq!(config.ports.ports, vec![80, 443, 32009, 61009]);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    config_path_from_env, load_config, load_config_file, parse_config, ConfigFormat,
    CONFIG_ENV_VAR,
};
pub use schema::{
    CapacityRule, ExitCodePolicy, ModuleSettings, MountSettings, OsSupport, PortSettings,
    PreflightConfig, ResolverSettings, ResourceSettings, SelinuxSettings,
};
pub use validator::{validate, validation_errors};
