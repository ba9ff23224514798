//! Loaded kernel modules.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::facts::ModuleFact;
use crate::shell::CommandRunner;
use crate::system::Host;

use super::Gatherer;

/// Module names from `lsmod` output, skipping the header row.
pub fn parse_lsmod(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|name| *name != "Module")
        .map(str::to_string)
        .collect()
}

/// Split `required` into enabled and missing, keeping its order.
pub fn partition_modules(required: &[String], loaded: &BTreeSet<String>) -> ModuleFact {
    let (enabled, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|module| loaded.contains(module));
    ModuleFact { enabled, missing }
}

/// Checks required modules against `lsmod`.
pub struct ModuleGatherer<'a> {
    required: &'a [String],
}

impl<'a> ModuleGatherer<'a> {
    pub fn new(required: &'a [String]) -> Self {
        Self { required }
    }
}

impl Gatherer for ModuleGatherer<'_> {
    type Fact = ModuleFact;

    fn name(&self) -> &'static str {
        "modules"
    }

    fn gather(&self, host: &dyn Host) -> Result<ModuleFact> {
        let loaded = parse_lsmod(&host.stdout("lsmod", &[])?);
        tracing::trace!("Loaded modules: {:?}", loaded);
        Ok(partition_modules(self.required, &loaded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::FakeHost;

    const LSMOD: &str = "Module                  Size  Used by
br_netfilter           22256  0
bridge                151336  1 br_netfilter
overlay                 71964  0
iptable_nat            12875  1
nf_nat_ipv4            14115  1 iptable_nat
iptable_filter         12810  1
";

    fn required(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn parse_lsmod_reads_first_column() {
        let loaded = parse_lsmod(LSMOD);
        assert!(loaded.contains("br_netfilter"));
        assert!(loaded.contains("nf_nat_ipv4"));
        assert!(!loaded.contains("Module"));
        assert_eq!(loaded.len(), 6);
    }

    #[test]
    fn used_by_column_does_not_count_as_loaded() {
        let loaded = parse_lsmod("Module Size Used by\nbridge 151336 1 ebtables\n");
        assert!(!loaded.contains("ebtables"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let loaded = parse_lsmod(LSMOD);
        let fact = partition_modules(&required(&["Overlay", "overlay"]), &loaded);
        assert_eq!(fact.enabled, vec!["overlay"]);
        assert_eq!(fact.missing, vec!["Overlay"]);
    }

    #[test]
    fn gatherer_reports_missing_in_required_order() {
        let required = required(&[
            "iptable_filter",
            "br_netfilter",
            "iptable_nat",
            "ebtables",
            "overlay",
        ]);
        let host = FakeHost::new().with_command("lsmod", LSMOD);

        let fact = ModuleGatherer::new(&required).gather(&host).unwrap();

        assert_eq!(
            fact.enabled,
            vec!["iptable_filter", "br_netfilter", "iptable_nat", "overlay"]
        );
        assert_eq!(fact.missing, vec!["ebtables"]);
    }

    #[test]
    fn gatherer_fails_without_lsmod() {
        let required = required(&["overlay"]);
        assert!(ModuleGatherer::new(&required)
            .gather(&FakeHost::new())
            .is_err());
    }
}
