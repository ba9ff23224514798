//! Competing management agents.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::facts::AgentFact;
use crate::system::{Host, ProcessTable};

use super::Gatherer;

/// Whether a process name contains any of the patterns, ignoring case.
pub fn matches_agent(name: &str, patterns: &[String]) -> bool {
    let name = name.to_lowercase();
    patterns
        .iter()
        .any(|pattern| name.contains(&pattern.to_lowercase()))
}

/// Scans the process table for agent names.
pub struct AgentGatherer<'a> {
    patterns: &'a [String],
}

impl<'a> AgentGatherer<'a> {
    pub fn new(patterns: &'a [String]) -> Self {
        Self { patterns }
    }
}

impl Gatherer for AgentGatherer<'_> {
    type Fact = AgentFact;

    fn name(&self) -> &'static str {
        "agents"
    }

    fn gather(&self, host: &dyn Host) -> Result<AgentFact> {
        let mut running_names = BTreeSet::new();

        for pid in host.pids() {
            let Some(name) = host.process_name(pid) else {
                tracing::trace!("Process {} exited during scan", pid);
                continue;
            };
            if matches_agent(&name, self.patterns) {
                tracing::debug!("Found agent process {} ({})", name, pid);
                running_names.insert(name);
            }
        }

        Ok(AgentFact { running_names })
    }
}
