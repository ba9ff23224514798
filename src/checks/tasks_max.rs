//! systemd task limit.

use crate::facts::{Gathered, TasksMaxFact};

use super::{CheckId, Detail, Status, Verdict};

pub fn evaluate(fact: &Gathered<TasksMaxFact>) -> Verdict {
    match fact {
        Ok(fact) => Verdict::new(
            CheckId::TasksMax,
            Status::pass_or(fact.is_set, Status::Fail),
            Detail::TasksMax(*fact),
        ),
        Err(unavailable) => Verdict::unavailable(CheckId::TasksMax, Status::Fail, unavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Unavailable;

    #[test]
    fn infinity_passes() {
        let verdict = evaluate(&Ok(TasksMaxFact { is_set: true }));
        assert_eq!(verdict.status, Status::Pass);
    }

    #[test]
    fn unset_fails() {
        let verdict = evaluate(&Ok(TasksMaxFact { is_set: false }));
        assert_eq!(verdict.status, Status::Fail);
    }

    #[test]
    fn unreadable_config_fails() {
        let verdict = evaluate(&Err(Unavailable::new("permission denied")));
        assert_eq!(verdict.status, Status::Fail);
        assert!(matches!(verdict.detail, Detail::Unavailable { .. }));
    }
}
