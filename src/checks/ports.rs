//! Port reachability.
//!
//! Closed ports only warn since they may be firewalled on purpose before
//! the install.

use serde::Serialize;

use crate::facts::{Gathered, InterfaceFacts, PortState, PortsFact};

use super::{CheckId, Detail, Status, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceResult {
    pub facts: InterfaceFacts,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortsDetail {
    pub interfaces: Vec<InterfaceResult>,
    /// Interfaces left out because their address could not be resolved.
    pub unresolved: Vec<String>,
}

/// Worst port status of one interface.
pub fn interface_status(facts: &InterfaceFacts) -> Status {
    Status::worst(facts.ports.iter().map(|p| match p.state {
        PortState::Open => Status::Pass,
        PortState::Closed => Status::Warn,
    }))
}

pub fn evaluate(fact: &Gathered<PortsFact>) -> Verdict {
    let fact = match fact {
        Ok(fact) => fact,
        Err(unavailable) => {
            return Verdict::unavailable(CheckId::Ports, Status::Warn, unavailable);
        }
    };

    let (resolved, unresolved): (Vec<&InterfaceFacts>, Vec<&InterfaceFacts>) =
        fact.interfaces.iter().partition(|i| i.address.is_some());

    let interfaces: Vec<InterfaceResult> = resolved
        .into_iter()
        .map(|facts| InterfaceResult {
            status: interface_status(facts),
            facts: facts.clone(),
        })
        .collect();
    let unresolved: Vec<String> = unresolved.into_iter().map(|i| i.interface.clone()).collect();

    let probed_any = !interfaces.is_empty();
    let status = if probed_any {
        Status::worst(interfaces.iter().map(|i| i.status))
    } else {
        Status::Warn
    };

    let mut notes = Vec::new();
    if !unresolved.is_empty() {
        notes.push(format!(
            "No address could be resolved for: {}",
            unresolved.join(", ")
        ));
    }
    if !probed_any {
        notes.push("No interface could be probed".to_string());
    }

    let mut verdict = Verdict::new(
        CheckId::Ports,
        status,
        Detail::Ports(PortsDetail {
            interfaces,
            unresolved,
        }),
    );
    verdict.notes = notes;
    verdict
}
