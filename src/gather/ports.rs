//! Port reachability per interface.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use regex::Regex;

use crate::config::PortSettings;
use crate::error::Result;
use crate::facts::{InterfaceFacts, PortFact, PortState, PortsFact};
use crate::shell::CommandRunner;
use crate::system::{FileReader, Host, PortProbe};

use super::Gatherer;

const NET_DEV: &str = "/proc/net/dev";

static INET_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"inet (\d+\.\d+\.\d+\.\d+)/").expect("INET_ADDRESS must compile")
});

/// Interface names from `/proc/net/dev`, skipping the two header rows.
pub fn parse_net_dev(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(2)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, _)| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Whether an interface name starts with one of the virtual prefixes.
pub fn is_virtual(interface: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| interface.starts_with(prefix.as_str()))
}

/// First IPv4 address in `ip addr show` output.
pub fn parse_inet_address(output: &str) -> Option<IpAddr> {
    INET_ADDRESS
        .captures(output)
        .and_then(|caps| caps[1].parse().ok())
}

/// Probes the configured ports on one interface or every physical one.
pub struct PortGatherer<'a> {
    settings: &'a PortSettings,
    interface: Option<&'a str>,
}

impl<'a> PortGatherer<'a> {
    pub fn new(settings: &'a PortSettings, interface: Option<&'a str>) -> Self {
        Self {
            settings,
            interface,
        }
    }

    fn interfaces(&self, host: &dyn Host) -> Result<Vec<String>> {
        if let Some(interface) = self.interface {
            tracing::debug!("Checking ports on interface {}", interface);
            return Ok(vec![interface.to_string()]);
        }

        tracing::debug!("Checking ports on all active interfaces");
        let content = host.read_to_string(Path::new(NET_DEV))?;
        Ok(parse_net_dev(&content)
            .into_iter()
            .filter(|name| !is_virtual(name, &self.settings.virtual_prefixes))
            .collect())
    }

    fn probe_interface(&self, host: &dyn Host, interface: String) -> InterfaceFacts {
        let address = match host.stdout("ip", &["addr", "show", interface.as_str()]) {
            Ok(output) => parse_inet_address(&output),
            Err(e) => {
                tracing::debug!("ip addr show {} failed: {}", interface, e);
                None
            }
        };

        let Some(address) = address else {
            tracing::warn!(
                "Unable to resolve an address for interface {}, skipping it",
                interface
            );
            return InterfaceFacts {
                interface,
                address: None,
                ports: Vec::new(),
            };
        };

        let timeout = Duration::from_secs(self.settings.timeout_secs);
        let ports: Vec<PortFact> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .settings
                .ports
                .iter()
                .map(|&port| {
                    let handle =
                        scope.spawn(move || host.is_open(SocketAddr::new(address, port), timeout));
                    (port, handle)
                })
                .collect();
            handles
                .into_iter()
                .map(|(port, handle)| {
                    let state = match handle.join() {
                        Ok(true) => PortState::Open,
                        Ok(false) => PortState::Closed,
                        Err(_) => {
                            tracing::warn!(
                                "Probe of {}:{} panicked, reporting it closed",
                                address,
                                port
                            );
                            PortState::Closed
                        }
                    };
                    tracing::debug!("{}:{} is {}", address, port, state);
                    PortFact { port, state }
                })
                .collect()
        });

        InterfaceFacts {
            interface,
            address: Some(address),
            ports,
        }
    }
}

/// Probe every interface on its own thread, keeping input order. An
/// interface whose probe panics is kept as unresolved.
fn probe_all<F>(names: Vec<String>, probe: F) -> Vec<InterfaceFacts>
where
    F: Fn(String) -> InterfaceFacts + Sync,
{
    thread::scope(|scope| {
        let probe = &probe;
        let handles: Vec<_> = names
            .into_iter()
            .map(|name| (name.clone(), scope.spawn(move || probe(name))))
            .collect();
        handles
            .into_iter()
            .map(|(name, handle)| {
                handle.join().unwrap_or_else(|_| {
                    tracing::warn!("Probing interface {} panicked, skipping it", name);
                    InterfaceFacts {
                        interface: name,
                        address: None,
                        ports: Vec::new(),
                    }
                })
            })
            .collect()
    })
}

impl Gatherer for PortGatherer<'_> {
    type Fact = PortsFact;

    fn name(&self) -> &'static str {
        "ports"
    }

    fn gather(&self, host: &dyn Host) -> Result<PortsFact> {
        let names = self.interfaces(host)?;

        let interfaces = probe_all(names, |name| self.probe_interface(host, name));
        Ok(PortsFact { interfaces })
    }
}
