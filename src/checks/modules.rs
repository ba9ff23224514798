//! Required kernel modules.

use crate::facts::{Gathered, ModuleFact};

use super::{CheckId, Detail, Status, Verdict};

/// PASS iff no required module is missing.
///
/// When the loaded list cannot be read every required module counts as
/// missing.
pub fn evaluate(fact: &Gathered<ModuleFact>, required: &[String]) -> Verdict {
    match fact {
        Ok(fact) => Verdict::new(
            CheckId::Modules,
            Status::pass_or(fact.missing.is_empty(), Status::Fail),
            Detail::Modules(fact.clone()),
        ),
        Err(unavailable) => Verdict::new(
            CheckId::Modules,
            Status::Fail,
            Detail::Modules(ModuleFact {
                enabled: Vec::new(),
                missing: required.to_vec(),
            }),
        )
        .with_note(format!("Loaded modules unavailable: {}", unavailable)),
    }
}
