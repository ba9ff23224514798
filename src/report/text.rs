//! Plain-text report layout.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::checks::{
    CheckId, CompatibilityDetail, CpuDetail, Detail, MemoryDetail, MountResult, PortsDetail,
    ResolverDetail, Status, Verdict,
};
use crate::engine::Evaluation;
use crate::facts::{AgentFact, ModuleFact, SelinuxFact, SysctlFact, TasksMaxFact};
use crate::host::HostProfile;

const HEAVY_RULE: &str = "=========================================================";
const LIGHT_RULE: &str = "---------------------------------------------------------";

const PORTS_NOTE: &str = "Note: This test will check all interfaces for open ports and \
                          each interface may not apply to the installation";

/// Writes the report sections in a fixed order.
pub struct TextReport {
    generated_at: DateTime<Utc>,
}

impl TextReport {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at }
    }

    pub fn write<W: Write>(&self, evaluation: &Evaluation, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}", HEAVY_RULE)?;
        writeln!(w, "                SYSTEM PROFILE RESULTS                   ")?;
        writeln!(w, "{}", HEAVY_RULE)?;
        writeln!(
            w,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        write_os_information(w, &evaluation.profile)?;
        writeln!(w, "{}", LIGHT_RULE)?;

        for verdict in &evaluation.verdicts {
            // The task limit only exists on SUSE and is left out elsewhere.
            if verdict.check == CheckId::TasksMax && verdict.status == Status::Skipped {
                continue;
            }
            write_section(w, verdict, evaluation.escalated(verdict))?;
            writeln!(w, "{}", LIGHT_RULE)?;
        }

        writeln!(w, "{}", HEAVY_RULE)?;
        writeln!(w)?;
        writeln!(w, "Overall Result: {}", evaluation.overall)?;
        writeln!(w)?;
        writeln!(w, "{}", HEAVY_RULE)?;
        Ok(())
    }
}

fn write_os_information<W: Write>(w: &mut W, profile: &HostProfile) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "OS Information")?;
    writeln!(w, "Name: {}", profile.dist_name)?;
    writeln!(w, "Distribution: {}", profile.distribution)?;
    writeln!(w, "Version: {}", profile.version)?;
    writeln!(w, "Based On: {}", profile.family)?;
    writeln!(w, "Machine: {}", profile.machine)?;
    writeln!(w)
}

fn write_section<W: Write>(w: &mut W, verdict: &Verdict, escalated: bool) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", heading(verdict.check))?;

    match &verdict.detail {
        Detail::Compatibility(detail) => write_compatibility(w, detail)?,
        Detail::Memory(detail) => write_memory(w, detail)?,
        Detail::Cpu(detail) => write_cpu(w, detail)?,
        Detail::Mounts { mounts } => write_mounts(w, mounts)?,
        Detail::Selinux(fact) => write_selinux(w, fact)?,
        Detail::Resolver(detail) => write_resolver(w, detail)?,
        Detail::Ports(detail) => write_ports(w, detail)?,
        Detail::Agents(fact) => write_agents(w, fact)?,
        Detail::Modules(fact) => write_modules(w, fact)?,
        Detail::TasksMax(fact) => write_tasks_max(w, fact)?,
        Detail::Sysctl(fact) => write_sysctl(w, fact)?,
        Detail::Unavailable { reason } => writeln!(w, "Unavailable: {}", reason)?,
        Detail::Skipped { reason } => writeln!(w, "Reason: {}", reason)?,
    }

    for note in &verdict.notes {
        writeln!(w, "Note: {}", note)?;
    }
    writeln!(w)?;
    writeln!(w, "{} Result: {}", verdict.check.title(), verdict.status)?;
    writeln!(
        w,
        "Escalated overall result: {}",
        if escalated { "yes" } else { "no" }
    )?;
    writeln!(w)
}

fn heading(check: CheckId) -> &'static str {
    match check {
        CheckId::Selinux => "SELinux Status",
        CheckId::Resolver => "/etc/resolv.conf Check",
        CheckId::Ports => "Port Check",
        CheckId::Agents => "Agent Checks",
        CheckId::Modules => "Module Checks",
        CheckId::Sysctl => "Sysctl Settings",
        other => other.title(),
    }
}

fn write_compatibility<W: Write>(w: &mut W, detail: &CompatibilityDetail) -> io::Result<()> {
    writeln!(w, "Supported OS: {}", detail.os_supported)?;
    writeln!(w, "Supported Version: {}", detail.version_supported)?;
    if !detail.supported_versions.is_empty() {
        writeln!(
            w,
            "Supported {} Versions: {}",
            detail.family,
            detail.supported_versions.join(", ")
        )?;
    }
    Ok(())
}

fn write_memory<W: Write>(w: &mut W, detail: &MemoryDetail) -> io::Result<()> {
    writeln!(w, "Minimum: {}", gb(detail.minimum_gb))?;
    match detail.actual_gb {
        Some(actual) => writeln!(w, "Actual: {}", gb(actual)),
        None => writeln!(w, "Actual: unknown"),
    }
}

fn write_cpu<W: Write>(w: &mut W, detail: &CpuDetail) -> io::Result<()> {
    writeln!(w, "Minimum: {}", detail.minimum_cores)?;
    match detail.actual_cores {
        Some(actual) => writeln!(w, "Actual: {}", actual),
        None => writeln!(w, "Actual: unknown"),
    }
}

fn write_mounts<W: Write>(w: &mut W, mounts: &[MountResult]) -> io::Result<()> {
    for result in mounts {
        let mount = &result.mount;
        writeln!(w, "Mount Point: {}", mount.path.display())?;
        if let Some(fs) = &mount.filesystem {
            match &mount.options {
                Some(options) => writeln!(w, "Filesystem: {} ({})", fs, options)?,
                None => writeln!(w, "Filesystem: {}", fs)?,
            }
        }
        if let Some(ftype) = mount.xfs_ftype {
            writeln!(w, "XFS ftype: {}", ftype)?;
        }
        writeln!(w, "Total Space: {}", gb(mount.total_gb))?;
        writeln!(w, "Recommended Space: {}", gb(mount.recommended_gb))?;
        writeln!(w, "Free Space: {}", gb(mount.free_gb))?;
        writeln!(w, "Mount Result: {}", result.status)?;
        writeln!(w)?;
    }
    Ok(())
}

fn write_selinux<W: Write>(w: &mut W, fact: &SelinuxFact) -> io::Result<()> {
    writeln!(w, "Current Status: {}", capitalize(&fact.enforce_mode))?;
    writeln!(w, "Config Setting: {}", capitalize(&fact.config_mode))
}

fn write_resolver<W: Write>(w: &mut W, detail: &ResolverDetail) -> io::Result<()> {
    writeln!(
        w,
        "Search Domains: {} (maximum {})",
        detail.fact.search_domains.len(),
        detail.max_search_domains
    )?;
    for domain in &detail.fact.search_domains {
        writeln!(w, "Search Domain: {}", domain)?;
    }
    for option in &detail.fact.options {
        writeln!(w, "Added Option: {}", option)?;
    }
    writeln!(w)?;
    writeln!(w, "Search Domain Result: {}", detail.search_status)?;
    writeln!(w, "Options Result: {}", detail.options_status)
}

fn write_ports<W: Write>(w: &mut W, detail: &PortsDetail) -> io::Result<()> {
    writeln!(w, "{}", PORTS_NOTE)?;
    for result in &detail.interfaces {
        let facts = &result.facts;
        writeln!(w)?;
        match facts.address {
            Some(address) => writeln!(w, "Interface {} ({}):", facts.interface, address)?,
            None => writeln!(w, "Interface {}:", facts.interface)?,
        }
        for port in &facts.ports {
            writeln!(w, "Port: {} - {}", port.port, port.state)?;
        }
        writeln!(w, "{} Result: {}", facts.interface, result.status)?;
    }
    for interface in &detail.unresolved {
        writeln!(w)?;
        writeln!(w, "Interface {}: no address, not probed", interface)?;
    }
    writeln!(w)
}

fn write_agents<W: Write>(w: &mut W, fact: &AgentFact) -> io::Result<()> {
    if fact.running_names.is_empty() {
        return writeln!(w, "No running agents found");
    }
    for name in &fact.running_names {
        writeln!(w, "Running: {}", name)?;
    }
    Ok(())
}

fn write_modules<W: Write>(w: &mut W, fact: &ModuleFact) -> io::Result<()> {
    write_list(w, "Enabled", &fact.enabled)?;
    if !fact.missing.is_empty() {
        writeln!(w)?;
        write_list(w, "Missing", &fact.missing)?;
    }
    Ok(())
}

fn write_tasks_max<W: Write>(w: &mut W, fact: &TasksMaxFact) -> io::Result<()> {
    writeln!(
        w,
        "DefaultTasksMax=infinity: {}",
        if fact.is_set { "set" } else { "not set" }
    )
}

fn write_sysctl<W: Write>(w: &mut W, fact: &SysctlFact) -> io::Result<()> {
    write_list(w, "Enabled", &fact.enabled)?;
    if !fact.disabled.is_empty() {
        writeln!(w)?;
        write_list(w, "Disabled", &fact.disabled)?;
    }
    Ok(())
}

fn write_list<W: Write>(w: &mut W, label: &str, items: &[String]) -> io::Result<()> {
    writeln!(w, "{}:", label)?;
    for item in items {
        writeln!(w, "{}", item)?;
    }
    Ok(())
}

fn gb(value: f64) -> String {
    format!("{:.2} GB", value)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
