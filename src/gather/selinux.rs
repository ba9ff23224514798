//! SELinux runtime and configured mode.

use std::path::Path;

use crate::error::Result;
use crate::facts::SelinuxFact;
use crate::shell::CommandRunner;
use crate::system::{FileReader, Host};

use super::Gatherer;

const SELINUX_CONFIG: &str = "/etc/selinux/config";

/// Mode named by the first `SELINUX=` line, lower-cased. Defaults to
/// `disabled` when no such line exists.
pub fn parse_selinux_config(content: &str) -> String {
    content
        .lines()
        .find_map(|line| line.trim().strip_prefix("SELINUX="))
        .map(|value| value.trim().trim_matches('"').to_lowercase())
        .unwrap_or_else(|| "disabled".to_string())
}

/// Reads `getenforce` and `/etc/selinux/config`.
pub struct SelinuxGatherer;

impl Gatherer for SelinuxGatherer {
    type Fact = SelinuxFact;

    fn name(&self) -> &'static str {
        "selinux"
    }

    fn gather(&self, host: &dyn Host) -> Result<SelinuxFact> {
        let enforce_mode = host.stdout("getenforce", &[])?.trim().to_lowercase();

        let config_mode = match host.read_to_string(Path::new(SELINUX_CONFIG)) {
            Ok(content) => parse_selinux_config(&content),
            Err(e) => {
                tracing::debug!("Unable to read {}: {}", SELINUX_CONFIG, e);
                "disabled".to_string()
            }
        };

        Ok(SelinuxFact {
            enforce_mode,
            config_mode,
        })
    }
}
