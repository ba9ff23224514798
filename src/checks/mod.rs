//! Check evaluation.
//!
//! Every check is a pure function from gathered facts and configuration to
//! a [`Verdict`]. Which checks apply is decided once from the host family
//! by [`CheckId::applies_to`]; checks that do not apply get a structural
//! `SKIPPED` verdict without their facts ever being gathered.
//!
//! # Modules
//!
//! - [`status`] - [`Status`] and [`OverallResult`]
//! - [`aggregate`] - Folding verdicts into the overall result
//! - One module per domain evaluator

pub mod agents;
pub mod aggregate;
pub mod compatibility;
pub mod modules;
pub mod mounts;
pub mod ports;
pub mod resolver;
pub mod resources;
pub mod selinux;
pub mod status;
pub mod sysctl;
pub mod tasks_max;

use std::path::Path;

use serde::Serialize;

use crate::config::PreflightConfig;
use crate::facts::{
    AgentFact, FactSnapshot, Gathered, ModuleFact, SelinuxFact, SysctlFact, TasksMaxFact,
    Unavailable,
};
use crate::host::{Family, HostProfile};

pub use aggregate::{aggregate, contributed};
pub use compatibility::CompatibilityDetail;
pub use mounts::MountResult;
pub use ports::{InterfaceResult, PortsDetail};
pub use resolver::ResolverDetail;
pub use resources::{CpuDetail, MemoryDetail};
pub use status::{OverallResult, Status};

/// Every check, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    Compatibility,
    Memory,
    CpuCores,
    Mounts,
    Selinux,
    Resolver,
    Ports,
    Agents,
    Modules,
    TasksMax,
    Sysctl,
}

impl CheckId {
    pub const ALL: [CheckId; 11] = [
        CheckId::Compatibility,
        CheckId::Memory,
        CheckId::CpuCores,
        CheckId::Mounts,
        CheckId::Selinux,
        CheckId::Resolver,
        CheckId::Ports,
        CheckId::Agents,
        CheckId::Modules,
        CheckId::TasksMax,
        CheckId::Sysctl,
    ];

    /// Section title used in the report.
    pub fn title(self) -> &'static str {
        match self {
            CheckId::Compatibility => "Compatibility",
            CheckId::Memory => "Memory",
            CheckId::CpuCores => "CPU Cores",
            CheckId::Mounts => "Mounts",
            CheckId::Selinux => "SELinux",
            CheckId::Resolver => "Resolver",
            CheckId::Ports => "Ports",
            CheckId::Agents => "Agents",
            CheckId::Modules => "Modules",
            CheckId::TasksMax => "Task Limit",
            CheckId::Sysctl => "Sysctl",
        }
    }

    /// Whether this check runs on hosts of `family`.
    pub fn applies_to(self, family: Family) -> bool {
        match self {
            CheckId::Selinux => family == Family::Rhel,
            CheckId::TasksMax => family == Family::Suse,
            _ => true,
        }
    }

    /// Checks that run on hosts of `family`, in report order.
    pub fn applicable(family: Family) -> Vec<CheckId> {
        CheckId::ALL
            .into_iter()
            .filter(|id| id.applies_to(family))
            .collect()
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Supporting detail of a verdict, echoing the facts it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Detail {
    Compatibility(CompatibilityDetail),
    Memory(MemoryDetail),
    Cpu(CpuDetail),
    Mounts { mounts: Vec<MountResult> },
    Selinux(SelinuxFact),
    Resolver(ResolverDetail),
    Ports(PortsDetail),
    Agents(AgentFact),
    Modules(ModuleFact),
    TasksMax(TasksMaxFact),
    Sysctl(SysctlFact),
    /// The facts could not be gathered.
    Unavailable { reason: String },
    /// The check did not run.
    Skipped { reason: String },
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub check: CheckId,
    pub status: Status,
    pub detail: Detail,
    /// Explanations shown alongside the result.
    pub notes: Vec<String>,
}

impl Verdict {
    pub fn new(check: CheckId, status: Status, detail: Detail) -> Self {
        Self {
            check,
            status,
            detail,
            notes: Vec::new(),
        }
    }

    /// Verdict for a check whose facts could not be gathered.
    pub fn unavailable(check: CheckId, status: Status, unavailable: &Unavailable) -> Self {
        Self::new(
            check,
            status,
            Detail::Unavailable {
                reason: unavailable.reason.clone(),
            },
        )
    }

    /// Verdict for a check that did not run.
    pub fn skipped(check: CheckId, reason: impl Into<String>) -> Self {
        Self::new(
            check,
            Status::Skipped,
            Detail::Skipped {
                reason: reason.into(),
            },
        )
    }

    /// Attach an explanatory note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Evaluate a frozen snapshot into one verdict per check, in report order.
///
/// Pure: the same snapshot, profile and config always give the same verdicts.
pub fn evaluate_all(
    snapshot: &FactSnapshot,
    profile: &HostProfile,
    config: &PreflightConfig,
) -> Vec<Verdict> {
    CheckId::ALL
        .into_iter()
        .map(|id| {
            if id.applies_to(profile.family) {
                evaluate(id, snapshot, profile, config)
            } else {
                Verdict::skipped(id, format!("not applicable to {} hosts", profile.family))
            }
        })
        .collect()
}

fn evaluate(
    id: CheckId,
    snapshot: &FactSnapshot,
    profile: &HostProfile,
    config: &PreflightConfig,
) -> Verdict {
    let support = config.os_support.get(profile.family.as_str());
    match id {
        CheckId::Compatibility => compatibility::evaluate(profile, &config.os_support),
        CheckId::Memory => {
            resources::evaluate_memory(&gathered(&snapshot.memory), &config.resources)
        }
        CheckId::CpuCores => {
            resources::evaluate_cpu(&gathered(&snapshot.cpu), &config.resources)
        }
        CheckId::Mounts => mounts::evaluate(&gathered(&snapshot.mounts)),
        CheckId::Selinux => {
            selinux::evaluate(&gathered(&snapshot.selinux), &config.selinux.active_modes)
        }
        CheckId::Resolver => resolver::evaluate(&gathered(&snapshot.resolver), &config.resolver),
        CheckId::Ports => ports::evaluate(&gathered(&snapshot.ports)),
        CheckId::Agents => agents::evaluate(&gathered(&snapshot.agents)),
        CheckId::Modules => {
            let verdict = modules::evaluate(
                &gathered(&snapshot.modules),
                config
                    .modules
                    .required_for(&profile.distribution, &profile.version),
            );
            let dir = support.map(|s| s.modules_dir.as_path());
            persistence_note(verdict, dir, "Load the missing modules and list them")
        }
        CheckId::TasksMax => tasks_max::evaluate(&gathered(&snapshot.tasks_max)),
        CheckId::Sysctl => {
            let verdict = sysctl::evaluate(&gathered(&snapshot.sysctl), &config.sysctl);
            let dir = support.map(|s| s.sysctl_dir.as_path());
            persistence_note(verdict, dir, "Set the disabled parameters to 1 and persist them")
        }
    }
}

/// Point a failed module or parameter check at the family's persistence
/// directory.
fn persistence_note(verdict: Verdict, dir: Option<&Path>, action: &str) -> Verdict {
    match dir {
        Some(dir) if verdict.status == Status::Fail => {
            verdict.with_note(format!("{} in a file under {}", action, dir.display()))
        }
        _ => verdict,
    }
}

fn gathered<T: Clone>(field: &Option<Gathered<T>>) -> Gathered<T> {
    field
        .clone()
        .unwrap_or_else(|| Err(Unavailable::new("not gathered")))
}
