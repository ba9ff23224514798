//! Free space per resolved mount.

use serde::Serialize;

use crate::facts::{Gathered, MountFact, MountsFact};

use super::{CheckId, Detail, Status, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountResult {
    pub mount: MountFact,
    pub status: Status,
}

/// PASS iff every mount has at least its recommended free space. An empty
/// mount list fails rather than passing vacuously.
pub fn evaluate(fact: &Gathered<MountsFact>) -> Verdict {
    let fact = match fact {
        Ok(fact) => fact,
        Err(unavailable) => {
            return Verdict::unavailable(CheckId::Mounts, Status::Fail, unavailable);
        }
    };

    if fact.mounts.is_empty() {
        let mut verdict = Verdict::new(
            CheckId::Mounts,
            Status::Fail,
            Detail::Mounts { mounts: Vec::new() },
        );
        verdict.notes.push("No mount was measured".to_string());
        return verdict;
    }

    let mounts: Vec<MountResult> = fact
        .mounts
        .iter()
        .map(|mount| MountResult {
            status: Status::pass_or(mount.free_gb >= mount.recommended_gb, Status::Fail),
            mount: mount.clone(),
        })
        .collect();

    let notes = mounts
        .iter()
        .filter(|m| m.mount.xfs_ftype == Some(0))
        .map(|m| {
            format!(
                "{} is XFS with ftype=0, which overlay storage does not support",
                m.mount.path.display()
            )
        })
        .collect();

    let mut verdict = Verdict::new(
        CheckId::Mounts,
        Status::worst(mounts.iter().map(|m| m.status)),
        Detail::Mounts { mounts },
    );
    verdict.notes = notes;
    verdict
}
