//! OS compatibility.
//!
//! Versions are compared as exact strings. A newer point release that is
//! not listed fails rather than being assumed compatible.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::OsSupport;
use crate::host::{Family, HostProfile};

use super::{CheckId, Detail, Status, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityDetail {
    pub family: Family,
    pub version: String,
    pub os_supported: Status,
    pub version_supported: Status,
    /// Versions listed for the family, empty when the family is unsupported.
    pub supported_versions: Vec<String>,
}

pub fn evaluate(profile: &HostProfile, support: &BTreeMap<String, OsSupport>) -> Verdict {
    let entry = support.get(profile.family.as_str());
    let os_supported = Status::pass_or(entry.is_some(), Status::Fail);
    let version_supported = Status::pass_or(
        entry.is_some_and(|e| e.versions.contains(&profile.version)),
        Status::Fail,
    );

    let detail = CompatibilityDetail {
        family: profile.family,
        version: profile.version.clone(),
        os_supported,
        version_supported,
        supported_versions: entry.map(|e| e.versions.clone()).unwrap_or_default(),
    };

    Verdict::new(
        CheckId::Compatibility,
        os_supported.worse(version_supported),
        Detail::Compatibility(detail),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreflightConfig;

    fn detail(verdict: &Verdict) -> &CompatibilityDetail {
        match &verdict.detail {
            Detail::Compatibility(d) => d,
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn supported_family_and_version_pass() {
        let config = PreflightConfig::default();
        let verdict = evaluate(
            &HostProfile::new("centos", "7.4", Family::Rhel),
            &config.os_support,
        );
        assert_eq!(verdict.status, Status::Pass);
        assert_eq!(detail(&verdict).os_supported, Status::Pass);
    }

    #[test]
    fn unlisted_version_fails_only_version() {
        let config = PreflightConfig::default();
        let verdict = evaluate(
            &HostProfile::new("centos", "7.6", Family::Rhel),
            &config.os_support,
        );
        assert_eq!(verdict.status, Status::Fail);
        assert_eq!(detail(&verdict).os_supported, Status::Pass);
        assert_eq!(detail(&verdict).version_supported, Status::Fail);
    }

    #[test]
    fn unknown_family_fails_both() {
        let config = PreflightConfig::default();
        let verdict = evaluate(
            &HostProfile::new("arch", "2024", Family::Unknown),
            &config.os_support,
        );
        assert_eq!(detail(&verdict).os_supported, Status::Fail);
        assert_eq!(detail(&verdict).version_supported, Status::Fail);
        assert!(detail(&verdict).supported_versions.is_empty());
    }

    #[test]
    fn suse_service_pack_matches_exactly() {
        let config = PreflightConfig::default();
        let verdict = evaluate(
            &HostProfile::new("sles", "12 SP3", Family::Suse),
            &config.os_support,
        );
        assert_eq!(verdict.status, Status::Pass);
    }

    #[test]
    fn uses_injected_table() {
        let support = BTreeMap::from([(
            "debian".to_string(),
            OsSupport {
                versions: vec!["22.04".to_string()],
                sysctl_dir: "/etc/sysctl.d".into(),
                modules_dir: "/etc/modules-load.d".into(),
            },
        )]);
        let verdict = evaluate(&HostProfile::new("ubuntu", "22.04", Family::Debian), &support);
        assert_eq!(verdict.status, Status::Pass);
    }
}
