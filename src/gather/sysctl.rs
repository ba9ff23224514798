//! Kernel parameters.

use crate::error::Result;
use crate::facts::SysctlFact;
use crate::shell::CommandRunner;
use crate::system::Host;

use super::Gatherer;

/// Value from `sysctl <name>` output of the form `name = value`.
pub fn parse_sysctl_value(output: &str) -> Option<&str> {
    output
        .lines()
        .next()
        .and_then(|line| line.split_once('='))
        .map(|(_, value)| value.trim())
}

/// Queries each parameter with `sysctl`; anything other than `1` is disabled.
pub struct SysctlGatherer<'a> {
    params: &'a [String],
}

impl<'a> SysctlGatherer<'a> {
    pub fn new(params: &'a [String]) -> Self {
        Self { params }
    }
}

impl Gatherer for SysctlGatherer<'_> {
    type Fact = SysctlFact;

    fn name(&self) -> &'static str {
        "sysctl"
    }

    fn gather(&self, host: &dyn Host) -> Result<SysctlFact> {
        let mut enabled = Vec::new();
        let mut disabled = Vec::new();

        for param in self.params {
            let value = match host.stdout("sysctl", &[param.as_str()]) {
                Ok(output) => parse_sysctl_value(&output).map(str::to_string),
                Err(e) => {
                    tracing::debug!("Unable to query {}: {}", param, e);
                    None
                }
            };

            if value.as_deref() == Some("1") {
                enabled.push(param.clone());
            } else {
                disabled.push(param.clone());
            }
        }

        Ok(SysctlFact { enabled, disabled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::FakeHost;

    fn params() -> Vec<String> {
        vec![
            "net.ipv4.ip_forward".to_string(),
            "fs.may_detach_mounts".to_string(),
            "net.bridge.bridge-nf-call-iptables".to_string(),
        ]
    }

    #[test]
    fn parses_value() {
        assert_eq!(
            parse_sysctl_value("net.ipv4.ip_forward = 1\n"),
            Some("1")
        );
        assert_eq!(parse_sysctl_value("garbage"), None);
    }

    #[test]
    fn splits_enabled_and_disabled() {
        let params = params();
        let host = FakeHost::new()
            .with_command("sysctl net.ipv4.ip_forward", "net.ipv4.ip_forward = 1\n")
            .with_command("sysctl fs.may_detach_mounts", "fs.may_detach_mounts = 0\n");

        let fact = SysctlGatherer::new(&params).gather(&host).unwrap();

        assert_eq!(fact.enabled, vec!["net.ipv4.ip_forward"]);
        assert_eq!(
            fact.disabled,
            vec!["fs.may_detach_mounts", "net.bridge.bridge-nf-call-iptables"]
        );
    }

    #[test]
    fn failed_query_counts_as_disabled() {
        let params = params();
        let host = FakeHost::new().with_failing_command("sysctl net.ipv4.ip_forward", 255);

        let fact = SysctlGatherer::new(&params).gather(&host).unwrap();

        assert!(fact.enabled.is_empty());
        assert_eq!(fact.disabled.len(), 3);
    }
}
