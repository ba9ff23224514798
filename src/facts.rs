//! Raw facts produced by the gatherers.
//!
//! Facts are plain values. Once gathered they are never mutated, so a
//! [`FactSnapshot`] can be evaluated any number of times with the same
//! outcome.

use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::PreflightError;

const KIB_PER_GIB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Round to two decimals, ties to even.
///
/// ```
/// use ae_preflight::facts::round2;
///
/// assert_eq!(round2(0.125), 0.12);
/// assert_eq!(round2(0.375), 0.38);
/// ```
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Kibibytes to GiB, rounded to two decimals.
pub fn kib_to_gib(kib: u64) -> f64 {
    round2(kib as f64 / KIB_PER_GIB)
}

/// Bytes to GiB, rounded to two decimals.
pub fn bytes_to_gib(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GIB)
}

/// Why a gatherer could not produce its fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unavailable {
    pub reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl From<PreflightError> for Unavailable {
    fn from(err: PreflightError) -> Self {
        Self::new(err.to_string())
    }
}

/// A fact, or the reason it could not be gathered.
pub type Gathered<T> = Result<T, Unavailable>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryFact {
    /// `MemTotal` as reported, in kB.
    pub total_kb: u64,
    pub actual_gb: f64,
}

impl MemoryFact {
    pub fn from_kb(total_kb: u64) -> Self {
        Self {
            total_kb,
            actual_gb: kib_to_gib(total_kb),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuFact {
    pub actual_cores: u32,
}

/// One resolved mount point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountFact {
    pub path: PathBuf,
    pub free_gb: f64,
    pub total_gb: f64,
    pub recommended_gb: f64,
    /// Filesystem type from the mount table.
    pub filesystem: Option<String>,
    /// Mount options from the mount table.
    pub options: Option<String>,
    /// `ftype` reported by `xfs_info`, for XFS only.
    pub xfs_ftype: Option<u8>,
}

/// Every resolved mount, root first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountsFact {
    pub mounts: Vec<MountFact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleFact {
    pub enabled: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SysctlFact {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelinuxFact {
    pub enforce_mode: String,
    pub config_mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResolverFact {
    pub search_domains: Vec<String>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    Open,
    Closed,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => f.write_str("Open"),
            PortState::Closed => f.write_str("Closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortFact {
    pub port: u16,
    pub state: PortState,
}

/// Probe results for one interface.
///
/// `address` is `None` when the interface address could not be resolved;
/// such an interface has no port results and is left out of evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceFacts {
    pub interface: String,
    pub address: Option<IpAddr>,
    pub ports: Vec<PortFact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortsFact {
    pub interfaces: Vec<InterfaceFacts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AgentFact {
    pub running_names: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TasksMaxFact {
    pub is_set: bool,
}

/// Everything gathered in one run.
///
/// A `None` field means the domain was not gathered because its check does
/// not apply to the host family.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactSnapshot {
    pub memory: Option<Gathered<MemoryFact>>,
    pub cpu: Option<Gathered<CpuFact>>,
    pub mounts: Option<Gathered<MountsFact>>,
    pub modules: Option<Gathered<ModuleFact>>,
    pub sysctl: Option<Gathered<SysctlFact>>,
    pub selinux: Option<Gathered<SelinuxFact>>,
    pub resolver: Option<Gathered<ResolverFact>>,
    pub ports: Option<Gathered<PortsFact>>,
    pub agents: Option<Gathered<AgentFact>>,
    pub tasks_max: Option<Gathered<TasksMaxFact>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_conversion_exact_gib() {
        assert_eq!(kib_to_gib(16_777_216), 16.0);
    }

    #[test]
    fn memory_conversion_rounds_to_two_decimals() {
        assert_eq!(kib_to_gib(264_119_388), 251.88);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(0.625), 0.62);
    }

    #[test]
    fn bytes_to_gib_rounds() {
        assert_eq!(bytes_to_gib(1024 * 1024 * 1024), 1.0);
        assert_eq!(bytes_to_gib(1024 * 1024 * 1024 * 3 / 2), 1.5);
    }

    #[test]
    fn memory_fact_from_kb() {
        let fact = MemoryFact::from_kb(16_777_216);
        assert_eq!(fact.total_kb, 16_777_216);
        assert_eq!(fact.actual_gb, 16.0);
    }

    #[test]
    fn unavailable_from_error_keeps_message() {
        let unavailable: Unavailable =
            PreflightError::unparseable("/proc/meminfo", "no MemTotal line").into();
        assert!(unavailable.reason.contains("no MemTotal line"));
        assert_eq!(unavailable.to_string(), unavailable.reason);
    }

    #[test]
    fn port_state_display() {
        assert_eq!(PortState::Open.to_string(), "Open");
        assert_eq!(PortState::Closed.to_string(), "Closed");
    }
}
