//! Resolver configuration.
//!
//! Too many search domains fail the check. Discouraged options such as
//! `rotate` only warn.

use serde::Serialize;

use crate::config::ResolverSettings;
use crate::facts::{Gathered, ResolverFact};

use super::{CheckId, Detail, Status, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolverDetail {
    pub fact: ResolverFact,
    pub max_search_domains: usize,
    pub search_status: Status,
    pub options_status: Status,
}

pub fn evaluate(fact: &Gathered<ResolverFact>, settings: &ResolverSettings) -> Verdict {
    let fact = match fact {
        Ok(fact) => fact,
        Err(unavailable) => {
            return Verdict::unavailable(CheckId::Resolver, Status::Warn, unavailable);
        }
    };

    let search_status = Status::pass_or(
        fact.search_domains.len() <= settings.max_search_domains,
        Status::Fail,
    );

    let discouraged: Vec<&str> = settings
        .discouraged_options
        .iter()
        .filter(|d| fact.options.iter().any(|o| o.contains(d.as_str())))
        .map(String::as_str)
        .collect();
    let options_status = Status::pass_or(discouraged.is_empty(), Status::Warn);

    let mut verdict = Verdict::new(
        CheckId::Resolver,
        search_status.worse(options_status),
        Detail::Resolver(ResolverDetail {
            fact: fact.clone(),
            max_search_domains: settings.max_search_domains,
            search_status,
            options_status,
        }),
    );
    for option in discouraged {
        verdict = verdict.with_note(format!(
            "The {} option has been known to cause problems during install, \
             consider commenting it out",
            option
        ));
    }
    verdict
}
