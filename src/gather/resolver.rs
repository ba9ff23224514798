//! `/etc/resolv.conf`.

use std::path::Path;

use crate::error::Result;
use crate::facts::ResolverFact;
use crate::system::{FileReader, Host};

use super::Gatherer;

const RESOLV_CONF: &str = "/etc/resolv.conf";

/// Search domains from the last `search` line and the payload of every
/// `options` line.
pub fn parse_resolv_conf(content: &str) -> ResolverFact {
    let mut fact = ResolverFact::default();

    for line in content.lines() {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("search") => fact.search_domains = words.map(str::to_string).collect(),
            Some("options") => {
                let payload = words.collect::<Vec<_>>().join(" ");
                if !payload.is_empty() {
                    fact.options.push(payload);
                }
            }
            _ => {}
        }
    }

    fact
}

/// Reads the resolver configuration.
pub struct ResolverGatherer;

impl Gatherer for ResolverGatherer {
    type Fact = ResolverFact;

    fn name(&self) -> &'static str {
        "resolver"
    }

    fn gather(&self, host: &dyn Host) -> Result<ResolverFact> {
        let content = host.read_to_string(Path::new(RESOLV_CONF))?;
        Ok(parse_resolv_conf(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::FakeHost;

    #[test]
    fn parses_search_and_options() {
        let fact = parse_resolv_conf(
            "# generated\n\
search corp.example dev.example\n\
nameserver 10.0.0.2\n\
options rotate timeout:1\n\
options ndots:2\n",
        );
        assert_eq!(fact.search_domains, vec!["corp.example", "dev.example"]);
        assert_eq!(fact.options, vec!["rotate timeout:1", "ndots:2"]);
    }

    #[test]
    fn last_search_line_wins() {
        let fact = parse_resolv_conf("search a.example\nsearch b.example c.example\n");
        assert_eq!(fact.search_domains, vec!["b.example", "c.example"]);
    }

    #[test]
    fn commented_lines_are_ignored() {
        let fact = parse_resolv_conf("#search a.example\n; options rotate\n");
        assert!(fact.search_domains.is_empty());
        assert!(fact.options.is_empty());
    }

    #[test]
    fn gatherer_fails_when_file_is_missing() {
        assert!(ResolverGatherer.gather(&FakeHost::new()).is_err());
    }

    #[test]
    fn gatherer_reads_file() {
        let host = FakeHost::new().with_file(RESOLV_CONF, "search one two three four\n");
        let fact = ResolverGatherer.gather(&host).unwrap();
        assert_eq!(fact.search_domains.len(), 4);
    }
}
