//! Configuration schema.
//!
//! Every table the checks rely on lives here so evaluators can be built
//! against synthetic tables in tests. All fields carry defaults, so a
//! config file only needs to name what it overrides.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for a preflight run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflightConfig {
    /// Supported distribution families keyed by family name (`rhel`, `debian`, `suse`).
    pub os_support: BTreeMap<String, OsSupport>,

    /// Memory and CPU minimums.
    pub resources: ResourceSettings,

    /// Mount candidates and capacity rules.
    pub mounts: MountSettings,

    /// Required kernel modules.
    pub modules: ModuleSettings,

    /// Kernel parameters that must equal `1`.
    pub sysctl: Vec<String>,

    /// Port probing.
    pub ports: PortSettings,

    /// Substrings identifying competing management agents.
    pub agents: Vec<String>,

    /// Resolver limits.
    pub resolver: ResolverSettings,

    /// SELinux modes considered active.
    pub selinux: SelinuxSettings,

    /// Timeout applied to every external command, in seconds.
    pub command_timeout_secs: u64,

    /// Where the text report is written.
    pub report_path: PathBuf,

    /// How the overall result maps to the process exit code.
    pub exit_code: ExitCodePolicy,
}

/// Support entry for one distribution family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsSupport {
    /// Exact version strings that are supported.
    pub versions: Vec<String>,
    /// Directory for persistent sysctl settings.
    #[serde(default = "default_sysctl_dir")]
    pub sysctl_dir: PathBuf,
    /// Directory for persistent module loading.
    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,
}

fn default_sysctl_dir() -> PathBuf {
    PathBuf::from("/etc/sysctl.d")
}

fn default_modules_dir() -> PathBuf {
    PathBuf::from("/etc/modules-load.d")
}

impl OsSupport {
    fn with_versions(versions: &[&str]) -> Self {
        Self {
            versions: versions.iter().map(|v| v.to_string()).collect(),
            sysctl_dir: default_sysctl_dir(),
            modules_dir: default_modules_dir(),
        }
    }
}

/// Memory and CPU minimums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    pub minimum_memory_gb: f64,
    pub minimum_cpu_cores: u32,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            minimum_memory_gb: 16.0,
            minimum_cpu_cores: 8,
        }
    }
}

/// A recommended free-space minimum for mounts under a path prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRule {
    pub prefix: String,
    pub recommended_gb: f64,
}

/// Mount candidates and capacity rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountSettings {
    /// Paths the install writes to, checked in order.
    pub candidates: Vec<PathBuf>,
    /// First matching prefix wins.
    pub rules: Vec<CapacityRule>,
    /// Space the whole install needs when everything lives on `/`.
    pub root_recommended_gb: f64,
}

impl Default for MountSettings {
    fn default() -> Self {
        Self {
            candidates: vec![
                PathBuf::from("/opt/anaconda"),
                PathBuf::from("/var/lib/gravity"),
                PathBuf::from("/tmp"),
            ],
            rules: vec![
                CapacityRule {
                    prefix: "/tmp".to_string(),
                    recommended_gb: 30.0,
                },
                CapacityRule {
                    prefix: "/var".to_string(),
                    recommended_gb: 100.0,
                },
                CapacityRule {
                    prefix: "/opt".to_string(),
                    recommended_gb: 100.0,
                },
            ],
            root_recommended_gb: 230.0,
        }
    }
}

/// Required kernel modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSettings {
    /// Modules required unless an exception applies.
    pub required: Vec<String>,
    /// Replacement lists keyed by distribution id, then version.
    pub exceptions: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ModuleSettings {
    /// The module list that applies to a distribution and version.
    pub fn required_for(&self, distribution: &str, version: &str) -> &[String] {
        self.exceptions
            .get(&distribution.to_lowercase())
            .and_then(|versions| versions.get(version))
            .map(Vec::as_slice)
            .unwrap_or(&self.required)
    }
}

impl Default for ModuleSettings {
    fn default() -> Self {
        let list = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();

        let mut exceptions = BTreeMap::new();
        exceptions.insert(
            "rhel".to_string(),
            BTreeMap::from([(
                "7.2".to_string(),
                list(&["iptable_filter", "iptable_nat", "ebtables", "bridge"]),
            )]),
        );
        exceptions.insert(
            "centos".to_string(),
            BTreeMap::from([(
                "7.2".to_string(),
                list(&["iptable_filter", "iptable_nat", "ebtables", "overlay", "bridge"]),
            )]),
        );

        Self {
            required: list(&[
                "iptable_filter",
                "br_netfilter",
                "iptable_nat",
                "ebtables",
                "overlay",
            ]),
            exceptions,
        }
    }
}

/// Port probing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortSettings {
    pub ports: Vec<u16>,
    /// Interface name prefixes skipped when probing all interfaces.
    pub virtual_prefixes: Vec<String>,
    /// Connect timeout per port, in seconds.
    pub timeout_secs: u64,
}

impl Default for PortSettings {
    fn default() -> Self {
        Self {
            ports: vec![80, 443, 32009, 61009],
            virtual_prefixes: ["veth", "flannel", "docker", "lo"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            timeout_secs: 2,
        }
    }
}

/// Resolver limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    pub max_search_domains: usize,
    /// Option substrings that interfere with the install.
    pub discouraged_options: Vec<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_search_domains: 3,
            discouraged_options: vec!["rotate".to_string()],
        }
    }
}

/// SELinux modes considered active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelinuxSettings {
    pub active_modes: Vec<String>,
}

impl Default for SelinuxSettings {
    fn default() -> Self {
        Self {
            active_modes: vec!["enabled".to_string(), "enforcing".to_string()],
        }
    }
}

/// How the overall result maps to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitCodePolicy {
    /// Exit 0 whenever the check sequence completes.
    #[default]
    AlwaysZero,
    /// PASS → 0, WARN → 1, FAIL → 2.
    ByResult,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        let os_support = BTreeMap::from([
            (
                "rhel".to_string(),
                OsSupport::with_versions(&["7.2", "7.3", "7.4", "7.5"]),
            ),
            ("debian".to_string(), OsSupport::with_versions(&["16.04"])),
            (
                "suse".to_string(),
                OsSupport::with_versions(&["12 SP2", "12 SP3"]),
            ),
        ]);

        Self {
            os_support,
            resources: ResourceSettings::default(),
            mounts: MountSettings::default(),
            modules: ModuleSettings::default(),
            sysctl: [
                "net.bridge.bridge-nf-call-ip6tables",
                "net.bridge.bridge-nf-call-iptables",
                "fs.may_detach_mounts",
                "net.ipv4.ip_forward",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ports: PortSettings::default(),
            agents: [
                "salt",
                "puppet",
                "sisidsdaemon",
                "sisipsdaemon",
                "sisipsutildaemon",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            resolver: ResolverSettings::default(),
            selinux: SelinuxSettings::default(),
            command_timeout_secs: 10,
            report_path: PathBuf::from("results.txt"),
            exit_code: ExitCodePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_install_requirements() {
        let config = PreflightConfig::default();
        assert_eq!(config.resources.minimum_memory_gb, 16.0);
        assert_eq!(config.resources.minimum_cpu_cores, 8);
        assert_eq!(config.ports.ports, vec![80, 443, 32009, 61009]);
        assert_eq!(config.ports.timeout_secs, 2);
        assert_eq!(config.sysctl.len(), 4);
        assert_eq!(config.agents.len(), 5);
        assert_eq!(config.mounts.root_recommended_gb, 230.0);
        assert_eq!(config.exit_code, ExitCodePolicy::AlwaysZero);
    }

    #[test]
    fn os_support_defaults_cover_three_families() {
        let config = PreflightConfig::default();
        assert_eq!(config.os_support.len(), 3);
        assert!(config.os_support["suse"]
            .versions
            .contains(&"12 SP3".to_string()));
        assert_eq!(
            config.os_support["rhel"].sysctl_dir,
            PathBuf::from("/etc/sysctl.d")
        );
    }

    #[test]
    fn required_modules_default_list() {
        let modules = ModuleSettings::default();
        let required = modules.required_for("ubuntu", "16.04");
        assert_eq!(required.len(), 5);
        assert!(required.contains(&"br_netfilter".to_string()));
    }

    #[test]
    fn required_modules_use_exception_for_distribution_and_version() {
        let modules = ModuleSettings::default();
        let required = modules.required_for("CentOS", "7.2");
        assert!(required.contains(&"bridge".to_string()));
        assert!(!required.contains(&"br_netfilter".to_string()));
    }

    #[test]
    fn required_modules_ignore_exception_for_other_version() {
        let modules = ModuleSettings::default();
        let required = modules.required_for("centos", "7.5");
        assert!(required.contains(&"br_netfilter".to_string()));
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: PreflightConfig = serde_yaml::from_str("agents: [chef]\n").unwrap();
        assert_eq!(config.agents, vec!["chef".to_string()]);
        assert_eq!(config.ports, PortSettings::default());
    }

    #[test]
    fn exit_code_policy_parses_snake_case() {
        let config: PreflightConfig = serde_yaml::from_str("exit_code: by_result\n").unwrap();
        assert_eq!(config.exit_code, ExitCodePolicy::ByResult);
    }
}
