//! Fact gathering.
//!
//! One [`Gatherer`] per domain reads the host through the [`Host`]
//! collaborator traits and returns a raw fact or an error. [`gather_all`]
//! runs every applicable gatherer on its own scoped thread and freezes the
//! results into a [`FactSnapshot`].
//!
//! # Modules
//!
//! - [`resources`] - Memory and CPU core count
//! - [`mounts`] - Mount resolution and free space
//! - [`modules`] - Loaded kernel modules
//! - [`sysctl`] - Kernel parameters
//! - [`selinux`] - SELinux runtime and configured mode
//! - [`resolver`] - `/etc/resolv.conf`
//! - [`ports`] - Port reachability per interface
//! - [`agents`] - Competing management agents
//! - [`tasks_max`] - systemd `DefaultTasksMax`

pub mod agents;
pub mod modules;
pub mod mounts;
pub mod ports;
pub mod resolver;
pub mod resources;
pub mod selinux;
pub mod sysctl;
pub mod tasks_max;

use std::thread::{self, Scope, ScopedJoinHandle};

use crate::checks::CheckId;
use crate::config::PreflightConfig;
use crate::error::Result;
use crate::facts::{FactSnapshot, Gathered, Unavailable};
use crate::host::HostProfile;
use crate::system::Host;

pub use agents::AgentGatherer;
pub use modules::ModuleGatherer;
pub use mounts::MountGatherer;
pub use ports::PortGatherer;
pub use resolver::ResolverGatherer;
pub use resources::{CpuGatherer, MemoryGatherer};
pub use selinux::SelinuxGatherer;
pub use sysctl::SysctlGatherer;
pub use tasks_max::TasksMaxGatherer;

/// Produces the raw fact for one domain.
pub trait Gatherer: Send + Sync {
    type Fact: Send + 'static;

    /// Domain name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Read the host and build the fact.
    fn gather(&self, host: &dyn Host) -> Result<Self::Fact>;
}

/// Run one gatherer, turning its error into an [`Unavailable`] fact.
pub fn run_gatherer<G: Gatherer + ?Sized>(gatherer: &G, host: &dyn Host) -> Gathered<G::Fact> {
    tracing::debug!("Gathering {} facts", gatherer.name());
    gatherer.gather(host).map_err(|e| {
        tracing::warn!("{} facts unavailable: {}", gatherer.name(), e);
        Unavailable::from(e)
    })
}

/// Inputs shared by every gatherer in a run.
#[derive(Debug, Clone, Copy)]
pub struct GatherContext<'a> {
    pub config: &'a PreflightConfig,
    pub profile: &'a HostProfile,
    /// Restrict port probing to this interface.
    pub interface: Option<&'a str>,
}

/// Gather facts for every check in `checks`, in parallel.
///
/// Domains whose check is not listed are left as `None` in the snapshot.
pub fn gather_all(host: &dyn Host, ctx: GatherContext<'_>, checks: &[CheckId]) -> FactSnapshot {
    let config = ctx.config;
    let wants = |id: CheckId| checks.contains(&id);

    let memory = MemoryGatherer;
    let cpu = CpuGatherer;
    let mounts = MountGatherer::new(&config.mounts);
    let modules = ModuleGatherer::new(
        config
            .modules
            .required_for(&ctx.profile.distribution, &ctx.profile.version),
    );
    let sysctl = SysctlGatherer::new(&config.sysctl);
    let selinux = SelinuxGatherer;
    let resolver = ResolverGatherer;
    let ports = PortGatherer::new(&config.ports, ctx.interface);
    let agents = AgentGatherer::new(&config.agents);
    let tasks_max = TasksMaxGatherer;

    thread::scope(|scope| {
        let memory = spawn(scope, wants(CheckId::Memory), &memory, host);
        let cpu = spawn(scope, wants(CheckId::CpuCores), &cpu, host);
        let mounts = spawn(scope, wants(CheckId::Mounts), &mounts, host);
        let modules = spawn(scope, wants(CheckId::Modules), &modules, host);
        let sysctl = spawn(scope, wants(CheckId::Sysctl), &sysctl, host);
        let selinux = spawn(scope, wants(CheckId::Selinux), &selinux, host);
        let resolver = spawn(scope, wants(CheckId::Resolver), &resolver, host);
        let ports = spawn(scope, wants(CheckId::Ports), &ports, host);
        let agents = spawn(scope, wants(CheckId::Agents), &agents, host);
        let tasks_max = spawn(scope, wants(CheckId::TasksMax), &tasks_max, host);

        FactSnapshot {
            memory: join(memory),
            cpu: join(cpu),
            mounts: join(mounts),
            modules: join(modules),
            sysctl: join(sysctl),
            selinux: join(selinux),
            resolver: join(resolver),
            ports: join(ports),
            agents: join(agents),
            tasks_max: join(tasks_max),
        }
    })
}

fn spawn<'scope, 'env, G: Gatherer>(
    scope: &'scope Scope<'scope, 'env>,
    enabled: bool,
    gatherer: &'env G,
    host: &'env dyn Host,
) -> Option<ScopedJoinHandle<'scope, Gathered<G::Fact>>> {
    enabled.then(|| scope.spawn(move || run_gatherer(gatherer, host)))
}

fn join<T>(handle: Option<ScopedJoinHandle<'_, Gathered<T>>>) -> Option<Gathered<T>> {
    handle.map(|h| {
        h.join()
            .unwrap_or_else(|_| Err(Unavailable::new("gatherer panicked")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreflightError;
    use crate::host::Family;
    use crate::system::FakeHost;

    struct Failing;

    impl Gatherer for Failing {
        type Fact = u32;

        fn name(&self) -> &'static str {
            "failing"
        }

        fn gather(&self, _host: &dyn Host) -> Result<u32> {
            Err(PreflightError::unparseable("source", "garbage"))
        }
    }

    #[test]
    fn run_gatherer_converts_errors() {
        let result = run_gatherer(&Failing, &FakeHost::new());
        let reason = result.unwrap_err().reason;
        assert!(reason.contains("garbage"));
    }

    #[test]
    fn gather_all_skips_unlisted_domains() {
        let config = PreflightConfig::default();
        let profile = HostProfile::new("ubuntu", "16.04", Family::Debian);
        let host = FakeHost::new().with_file("/proc/meminfo", "MemTotal:       16777216 kB\n");
        let ctx = GatherContext {
            config: &config,
            profile: &profile,
            interface: None,
        };

        let snapshot = gather_all(&host, ctx, &[CheckId::Memory]);

        assert_eq!(snapshot.memory.unwrap().unwrap().actual_gb, 16.0);
        assert!(snapshot.cpu.is_none());
        assert!(snapshot.selinux.is_none());
        assert!(snapshot.tasks_max.is_none());
    }

    #[test]
    fn gather_all_records_unavailable_sources() {
        let config = PreflightConfig::default();
        let profile = HostProfile::new("sles", "12 SP3", Family::Suse);
        let ctx = GatherContext {
            config: &config,
            profile: &profile,
            interface: None,
        };

        let snapshot = gather_all(
            &FakeHost::new(),
            ctx,
            &[CheckId::Memory, CheckId::Resolver, CheckId::TasksMax],
        );

        assert!(snapshot.memory.unwrap().is_err());
        assert!(snapshot.resolver.unwrap().is_err());
        assert!(snapshot.tasks_max.unwrap().is_err());
    }
}
