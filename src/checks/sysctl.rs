//! Kernel parameters.

use crate::facts::{Gathered, SysctlFact};

use super::{CheckId, Detail, Status, Verdict};

/// PASS iff no parameter is disabled.
pub fn evaluate(fact: &Gathered<SysctlFact>, params: &[String]) -> Verdict {
    match fact {
        Ok(fact) => Verdict::new(
            CheckId::Sysctl,
            Status::pass_or(fact.disabled.is_empty(), Status::Fail),
            Detail::Sysctl(fact.clone()),
        ),
        Err(unavailable) => Verdict::new(
            CheckId::Sysctl,
            Status::Fail,
            Detail::Sysctl(SysctlFact {
                enabled: Vec::new(),
                disabled: params.to_vec(),
            }),
        )
        .with_note(format!("Kernel parameters unavailable: {}", unavailable)),
    }
}
