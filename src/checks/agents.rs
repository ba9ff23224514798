//! Competing management agents.

use crate::facts::{AgentFact, Gathered};

use super::{CheckId, Detail, Status, Verdict};

/// PASS when no agent runs; otherwise WARN, since the install can still
/// proceed.
pub fn evaluate(fact: &Gathered<AgentFact>) -> Verdict {
    let fact = match fact {
        Ok(fact) => fact,
        Err(unavailable) => {
            return Verdict::unavailable(CheckId::Agents, Status::Warn, unavailable);
        }
    };

    if fact.running_names.is_empty() {
        return Verdict::new(CheckId::Agents, Status::Pass, Detail::Agents(fact.clone()));
    }

    Verdict::new(CheckId::Agents, Status::Warn, Detail::Agents(fact.clone())).with_note(
        "These agents have been known to block traffic or change settings \
         the installation depends on",
    )
}
