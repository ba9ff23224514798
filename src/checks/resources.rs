//! Memory and CPU minimums.

use serde::Serialize;

use crate::config::ResourceSettings;
use crate::facts::{CpuFact, Gathered, MemoryFact};

use super::{CheckId, Detail, Status, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryDetail {
    pub minimum_gb: f64,
    /// `None` when memory could not be read.
    pub actual_gb: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuDetail {
    pub minimum_cores: u32,
    /// `None` when the core count could not be read.
    pub actual_cores: Option<u32>,
}

pub fn evaluate_memory(fact: &Gathered<MemoryFact>, settings: &ResourceSettings) -> Verdict {
    let minimum_gb = settings.minimum_memory_gb;
    match fact {
        Ok(fact) => Verdict::new(
            CheckId::Memory,
            Status::pass_or(fact.actual_gb >= minimum_gb, Status::Fail),
            Detail::Memory(MemoryDetail {
                minimum_gb,
                actual_gb: Some(fact.actual_gb),
            }),
        ),
        Err(unavailable) => Verdict::new(
            CheckId::Memory,
            Status::Fail,
            Detail::Memory(MemoryDetail {
                minimum_gb,
                actual_gb: None,
            }),
        )
        .with_note(format!("Memory unavailable: {}", unavailable)),
    }
}

pub fn evaluate_cpu(fact: &Gathered<CpuFact>, settings: &ResourceSettings) -> Verdict {
    let minimum_cores = settings.minimum_cpu_cores;
    match fact {
        Ok(fact) => Verdict::new(
            CheckId::CpuCores,
            Status::pass_or(fact.actual_cores >= minimum_cores, Status::Fail),
            Detail::Cpu(CpuDetail {
                minimum_cores,
                actual_cores: Some(fact.actual_cores),
            }),
        ),
        Err(unavailable) => Verdict::new(
            CheckId::CpuCores,
            Status::Fail,
            Detail::Cpu(CpuDetail {
                minimum_cores,
                actual_cores: None,
            }),
        )
        .with_note(format!("CPU core count unavailable: {}", unavailable)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Unavailable;

    fn memory(actual_gb: f64) -> Gathered<MemoryFact> {
        Ok(MemoryFact {
            total_kb: 0,
            actual_gb,
        })
    }

    #[test]
    fn memory_at_minimum_passes() {
        let settings = ResourceSettings::default();
        assert_eq!(evaluate_memory(&memory(16.0), &settings).status, Status::Pass);
        assert_eq!(evaluate_memory(&memory(251.88), &settings).status, Status::Pass);
    }

    #[test]
    fn memory_below_minimum_fails() {
        let settings = ResourceSettings::default();
        assert_eq!(evaluate_memory(&memory(15.99), &settings).status, Status::Fail);
    }

    #[test]
    fn memory_pass_iff_actual_at_least_minimum() {
        for (actual, minimum) in [(0.0, 0.0), (1.5, 2.0), (2.0, 1.5), (64.0, 64.0), (8.0, 16.0)] {
            let settings = ResourceSettings {
                minimum_memory_gb: minimum,
                minimum_cpu_cores: 1,
            };
            let expected = if actual >= minimum { Status::Pass } else { Status::Fail };
            assert_eq!(evaluate_memory(&memory(actual), &settings).status, expected);
        }
    }

    #[test]
    fn unavailable_memory_fails_with_detail() {
        let verdict = evaluate_memory(
            &Err(Unavailable::new("no MemTotal line")),
            &ResourceSettings::default(),
        );
        assert_eq!(verdict.status, Status::Fail);
        assert_eq!(
            verdict.detail,
            Detail::Memory(MemoryDetail {
                minimum_gb: 16.0,
                actual_gb: None,
            })
        );
        assert!(verdict.notes[0].contains("unavailable"));
    }

    #[test]
    fn cpu_thresholds() {
        let settings = ResourceSettings::default();
        let cores = |n| Ok(CpuFact { actual_cores: n });
        assert_eq!(evaluate_cpu(&cores(8), &settings).status, Status::Pass);
        assert_eq!(evaluate_cpu(&cores(7), &settings).status, Status::Fail);
        assert_eq!(
            evaluate_cpu(&Err(Unavailable::new("getconf failed")), &settings).status,
            Status::Fail
        );
    }
}
