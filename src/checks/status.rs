//! Verdict status and the overall result.

use serde::Serialize;

/// Outcome of one check or sub-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Warn,
    Fail,
    /// The check did not run. Neutral for escalation.
    Skipped,
}

impl Status {
    /// Escalation weight. `Skipped` weighs the same as `Pass`.
    pub fn severity(self) -> u8 {
        match self {
            Status::Pass | Status::Skipped => 0,
            Status::Warn => 1,
            Status::Fail => 2,
        }
    }

    /// The more severe of two statuses. Ties keep `self`.
    pub fn worse(self, other: Status) -> Status {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    /// Worst status in a sequence, `Pass` when empty.
    pub fn worst(statuses: impl IntoIterator<Item = Status>) -> Status {
        statuses.into_iter().fold(Status::Pass, Status::worse)
    }

    /// `Pass` when `ok`, otherwise `failure`.
    pub fn pass_or(ok: bool, failure: Status) -> Status {
        if ok {
            Status::Pass
        } else {
            failure
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
            Status::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallResult {
    Pass,
    Warn,
    Fail,
}

impl OverallResult {
    /// The overall result a single status escalates to.
    pub fn from_status(status: Status) -> OverallResult {
        match status {
            Status::Pass | Status::Skipped => OverallResult::Pass,
            Status::Warn => OverallResult::Warn,
            Status::Fail => OverallResult::Fail,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OverallResult::Pass => "PASS",
            OverallResult::Warn => "WARN",
            OverallResult::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for OverallResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order() {
        assert!(Status::Fail.severity() > Status::Warn.severity());
        assert!(Status::Warn.severity() > Status::Pass.severity());
        assert_eq!(Status::Skipped.severity(), Status::Pass.severity());
    }

    #[test]
    fn worse_picks_higher_severity() {
        assert_eq!(Status::Pass.worse(Status::Warn), Status::Warn);
        assert_eq!(Status::Fail.worse(Status::Warn), Status::Fail);
        assert_eq!(Status::Pass.worse(Status::Skipped), Status::Pass);
    }

    #[test]
    fn worst_of_empty_is_pass() {
        assert_eq!(Status::worst(Vec::<Status>::new()), Status::Pass);
        assert_eq!(
            Status::worst([Status::Warn, Status::Pass, Status::Fail]),
            Status::Fail
        );
    }

    #[test]
    fn pass_or() {
        assert_eq!(Status::pass_or(true, Status::Fail), Status::Pass);
        assert_eq!(Status::pass_or(false, Status::Warn), Status::Warn);
    }

    #[test]
    fn display_is_uppercase() {
        assert_eq!(Status::Skipped.to_string(), "SKIPPED");
        assert_eq!(OverallResult::Warn.to_string(), "WARN");
    }

    #[test]
    fn overall_from_status() {
        assert_eq!(OverallResult::from_status(Status::Skipped), OverallResult::Pass);
        assert_eq!(OverallResult::from_status(Status::Fail), OverallResult::Fail);
    }

    #[test]
    fn overall_result_orders_by_severity() {
        assert!(OverallResult::Fail > OverallResult::Warn);
        assert!(OverallResult::Warn > OverallResult::Pass);
    }
}
