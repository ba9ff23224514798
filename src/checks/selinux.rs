//! SELinux mode.

use crate::facts::{Gathered, SelinuxFact};

use super::{CheckId, Detail, Status, Verdict};

/// PASS iff neither the runtime nor the configured mode is active.
///
/// A host where `getenforce` cannot run is skipped rather than failed.
pub fn evaluate(fact: &Gathered<SelinuxFact>, active_modes: &[String]) -> Verdict {
    let fact = match fact {
        Ok(fact) => fact,
        Err(unavailable) => {
            return Verdict::skipped(
                CheckId::Selinux,
                format!("SELinux status unavailable: {}", unavailable),
            );
        }
    };

    let is_active = |mode: &str| active_modes.iter().any(|active| active == mode);
    let ok = !is_active(&fact.config_mode) && !is_active(&fact.enforce_mode);

    Verdict::new(
        CheckId::Selinux,
        Status::pass_or(ok, Status::Fail),
        Detail::Selinux(fact.clone()),
    )
}
