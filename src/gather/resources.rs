//! Memory and CPU core count.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PreflightError, Result};
use crate::facts::{CpuFact, MemoryFact};
use crate::shell::CommandRunner;
use crate::system::{FileReader, Host};

use super::Gatherer;

const MEMINFO: &str = "/proc/meminfo";

static MEM_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^MemTotal:\s+(\d+)").expect("MEM_TOTAL must compile")
});

/// Extract `MemTotal` (kB) from `/proc/meminfo` content.
pub fn parse_mem_total(content: &str) -> Result<u64> {
    let caps = MEM_TOTAL
        .captures(content)
        .ok_or_else(|| PreflightError::unparseable(MEMINFO, "no MemTotal line"))?;
    caps[1]
        .parse()
        .map_err(|e| PreflightError::unparseable(MEMINFO, format!("bad MemTotal: {}", e)))
}

/// Parse the output of `getconf _NPROCESSORS_ONLN`.
pub fn parse_core_count(output: &str) -> Result<u32> {
    output.trim().parse().map_err(|_| {
        PreflightError::unparseable(
            "getconf _NPROCESSORS_ONLN",
            format!("expected a core count, got {:?}", output.trim()),
        )
    })
}

/// Reads total memory from `/proc/meminfo`.
pub struct MemoryGatherer;

impl Gatherer for MemoryGatherer {
    type Fact = MemoryFact;

    fn name(&self) -> &'static str {
        "memory"
    }

    fn gather(&self, host: &dyn Host) -> Result<MemoryFact> {
        let content = host.read_to_string(Path::new(MEMINFO))?;
        let fact = MemoryFact::from_kb(parse_mem_total(&content)?);
        tracing::debug!("MemTotal {} kB = {} GB", fact.total_kb, fact.actual_gb);
        Ok(fact)
    }
}

/// Reads the online core count from `getconf`.
pub struct CpuGatherer;

impl Gatherer for CpuGatherer {
    type Fact = CpuFact;

    fn name(&self) -> &'static str {
        "cpu"
    }

    fn gather(&self, host: &dyn Host) -> Result<CpuFact> {
        let output = host.stdout("getconf", &["_NPROCESSORS_ONLN"])?;
        Ok(CpuFact {
            actual_cores: parse_core_count(&output)?,
        })
    }
}
