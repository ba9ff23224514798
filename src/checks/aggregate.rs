//! Folding verdicts into the overall result.
//!
//! The fold is a severity maximum, so it never downgrades and does not
//! depend on the order verdicts arrive in. `SKIPPED` is neutral.

use super::{OverallResult, Status, Verdict};

/// Overall result of a set of statuses.
pub fn overall_result(statuses: impl IntoIterator<Item = Status>) -> OverallResult {
    statuses
        .into_iter()
        .map(OverallResult::from_status)
        .max()
        .unwrap_or(OverallResult::Pass)
}

/// Overall result of a run.
pub fn aggregate(verdicts: &[Verdict]) -> OverallResult {
    overall_result(verdicts.iter().map(|v| v.status))
}

/// Whether a verdict with `status` escalated the run to `overall`.
pub fn contributed(status: Status, overall: OverallResult) -> bool {
    overall != OverallResult::Pass && OverallResult::from_status(status) == overall
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Status::{Fail, Pass, Skipped, Warn};
    use crate::checks::{CheckId, Detail};

    #[test]
    fn warn_without_fail_is_warn() {
        assert_eq!(overall_result([Pass, Warn, Pass, Skipped]), OverallResult::Warn);
    }

    #[test]
    fn any_fail_is_fail() {
        assert_eq!(overall_result([Pass, Fail, Warn]), OverallResult::Fail);
    }

    #[test]
    fn pass_and_skipped_is_pass() {
        assert_eq!(overall_result([Pass, Skipped]), OverallResult::Pass);
        assert_eq!(overall_result([Skipped, Skipped]), OverallResult::Pass);
        assert_eq!(overall_result(Vec::<Status>::new()), OverallResult::Pass);
    }

    #[test]
    fn order_does_not_matter() {
        let statuses = [Pass, Warn, Skipped, Fail];
        let expected = overall_result(statuses);
        for rotation in 0..statuses.len() {
            let mut rotated = statuses;
            rotated.rotate_left(rotation);
            assert_eq!(overall_result(rotated), expected);
            rotated.reverse();
            assert_eq!(overall_result(rotated), expected);
        }
    }

    #[test]
    fn folding_in_parts_matches_folding_at_once() {
        let left = [Pass, Warn];
        let right = [Skipped, Pass];
        let combined = overall_result([Status::worst(left), Status::worst(right)]);
        assert_eq!(combined, overall_result(left.into_iter().chain(right)));
    }

    #[test]
    fn contributed_matches_overall_severity() {
        assert!(contributed(Fail, OverallResult::Fail));
        assert!(!contributed(Warn, OverallResult::Fail));
        assert!(contributed(Warn, OverallResult::Warn));
        assert!(!contributed(Pass, OverallResult::Pass));
        assert!(!contributed(Skipped, OverallResult::Warn));
    }

    #[test]
    fn aggregate_reads_verdict_statuses() {
        let verdicts = vec![
            Verdict::skipped(CheckId::Selinux, "not applicable"),
            Verdict::new(
                CheckId::TasksMax,
                Warn,
                Detail::Unavailable {
                    reason: "x".into(),
                },
            ),
        ];
        assert_eq!(aggregate(&verdicts), OverallResult::Warn);
    }
}
