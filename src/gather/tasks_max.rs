//! systemd `DefaultTasksMax`.

use std::path::Path;

use crate::error::Result;
use crate::facts::TasksMaxFact;
use crate::system::{FileReader, Host};

use super::Gatherer;

const SYSTEM_CONF: &str = "/etc/systemd/system.conf";

/// Whether a line sets `DefaultTasksMax=infinity`.
pub fn has_infinite_tasks_max(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.starts_with("DefaultTasksMax=infinity"))
}

/// Reads `/etc/systemd/system.conf`.
pub struct TasksMaxGatherer;

impl Gatherer for TasksMaxGatherer {
    type Fact = TasksMaxFact;

    fn name(&self) -> &'static str {
        "tasks_max"
    }

    fn gather(&self, host: &dyn Host) -> Result<TasksMaxFact> {
        let content = host.read_to_string(Path::new(SYSTEM_CONF))?;
        Ok(TasksMaxFact {
            is_set: has_infinite_tasks_max(&content),
        })
    }
}
