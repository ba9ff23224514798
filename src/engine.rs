//! Run orchestration.
//!
//! A run detects the host, decides which checks apply to its family,
//! gathers facts for those checks in parallel, then evaluates the frozen
//! snapshot and folds the verdicts into the overall result.

use crate::checks::{self, contributed, CheckId, OverallResult, Verdict};
use crate::config::PreflightConfig;
use crate::facts::FactSnapshot;
use crate::gather::{gather_all, GatherContext};
use crate::host::{detect_host, HostProfile};
use crate::system::Host;

/// Options for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions<'a> {
    /// Probe ports on this interface only.
    pub interface: Option<&'a str>,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub profile: HostProfile,
    pub snapshot: FactSnapshot,
    /// One verdict per check, in report order.
    pub verdicts: Vec<Verdict>,
    pub overall: OverallResult,
}

impl Evaluation {
    /// Whether `verdict` escalated the overall result.
    pub fn escalated(&self, verdict: &Verdict) -> bool {
        contributed(verdict.status, self.overall)
    }

    /// The verdict for one check.
    pub fn verdict(&self, check: CheckId) -> Option<&Verdict> {
        self.verdicts.iter().find(|v| v.check == check)
    }
}

/// Run every applicable check against `host`.
pub fn run_checks(
    host: &dyn Host,
    config: &PreflightConfig,
    options: RunOptions<'_>,
) -> Evaluation {
    let profile = detect_host(host);
    let checks = CheckId::applicable(profile.family);
    tracing::debug!(
        "Running {} checks for {} family",
        checks.len(),
        profile.family
    );

    let ctx = GatherContext {
        config,
        profile: &profile,
        interface: options.interface,
    };
    let snapshot = gather_all(host, ctx, &checks);
    evaluate(profile, snapshot, config)
}

/// Evaluate an already gathered snapshot.
pub fn evaluate(
    profile: HostProfile,
    snapshot: FactSnapshot,
    config: &PreflightConfig,
) -> Evaluation {
    let verdicts = checks::evaluate_all(&snapshot, &profile, config);
    let overall = checks::aggregate(&verdicts);

    for verdict in &verdicts {
        tracing::debug!("{} result: {}", verdict.check, verdict.status);
    }
    tracing::debug!("Overall result: {}", overall);

    Evaluation {
        profile,
        snapshot,
        verdicts,
        overall,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::checks::{Detail, Status};
    use crate::host::Family;

    fn run(host: &dyn Host) -> Evaluation {
        run_checks(host, &PreflightConfig::default(), RunOptions::default())
    }

    #[test]
    fn healthy_rhel_host_passes() {
        let evaluation = run(&healthy_rhel());
        assert_eq!(evaluation.profile.family, Family::Rhel);
        assert_eq!(evaluation.profile.version, "7.5");
        assert_eq!(evaluation.overall, OverallResult::Pass);
        assert_eq!(evaluation.verdicts.len(), CheckId::ALL.len());
        assert_eq!(
            evaluation.verdict(CheckId::Selinux).unwrap().status,
            Status::Pass
        );
        assert_eq!(
            evaluation.verdict(CheckId::TasksMax).unwrap().status,
            Status::Skipped
        );
    }

    #[test]
    fn healthy_debian_host_skips_selinux_and_task_limit() {
        let evaluation = run(&healthy_debian());
        assert_eq!(evaluation.profile.family, Family::Debian);
        assert_eq!(evaluation.overall, OverallResult::Pass);
        assert!(evaluation.snapshot.selinux.is_none());
        assert!(evaluation.snapshot.tasks_max.is_none());
        assert_eq!(
            evaluation.verdict(CheckId::Selinux).unwrap().status,
            Status::Skipped
        );
    }

    #[test]
    fn healthy_suse_host_checks_task_limit() {
        let evaluation = run(&healthy_suse());
        assert_eq!(evaluation.profile.version, "12 SP3");
        assert_eq!(evaluation.overall, OverallResult::Pass);
        assert_eq!(
            evaluation.verdict(CheckId::TasksMax).unwrap().status,
            Status::Pass
        );
    }

    #[test]
    fn running_agent_warns_and_escalates() {
        let host = healthy_debian().with_process(4242, "salt-minion");
        let evaluation = run(&host);

        assert_eq!(evaluation.overall, OverallResult::Warn);
        let agents = evaluation.verdict(CheckId::Agents).unwrap();
        assert_eq!(agents.status, Status::Warn);
        assert!(evaluation.escalated(agents));
        let memory = evaluation.verdict(CheckId::Memory).unwrap();
        assert!(!evaluation.escalated(memory));
    }

    #[test]
    fn missing_meminfo_fails_but_run_completes() {
        let host = healthy_debian().with_file("/proc/meminfo", "garbage\n");
        let evaluation = run(&host);

        assert_eq!(evaluation.overall, OverallResult::Fail);
        let memory = evaluation.verdict(CheckId::Memory).unwrap();
        assert_eq!(memory.status, Status::Fail);
        assert!(!memory.notes.is_empty());
        assert_eq!(
            evaluation.verdict(CheckId::Ports).unwrap().status,
            Status::Pass
        );
    }

    #[test]
    fn single_interface_option_probes_only_that_interface() {
        let host = healthy_debian();
        let evaluation = run_checks(
            &host,
            &PreflightConfig::default(),
            RunOptions {
                interface: Some("eth0"),
            },
        );
        match &evaluation.verdict(CheckId::Ports).unwrap().detail {
            Detail::Ports(detail) => {
                assert_eq!(detail.interfaces.len(), 1);
                assert_eq!(detail.interfaces[0].facts.interface, "eth0");
            }
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn evaluate_is_repeatable_over_a_snapshot() {
        let first = run(&healthy_rhel());
        let second = evaluate(
            first.profile.clone(),
            first.snapshot.clone(),
            &PreflightConfig::default(),
        );
        assert_eq!(first.verdicts, second.verdicts);
        assert_eq!(first.overall, second.overall);
    }
}
