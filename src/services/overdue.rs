use chrono::{DateTime, Duration, Utc};

use crate::models::{SnoozePolicy, Todo, DEFAULT_OVERDUE_THRESHOLD_HOURS};

pub fn overdue_threshold() -> Duration {
    threshold_from_hours(DEFAULT_OVERDUE_THRESHOLD_HOURS)
}

/// Out-of-range hour counts fall back to the default threshold.
pub fn threshold_from_hours(hours: i64) -> Duration {
    Duration::try_hours(hours)
        .filter(|d| *d > Duration::zero())
        .unwrap_or_else(|| Duration::hours(DEFAULT_OVERDUE_THRESHOLD_HOURS))
}

/// Overdue means incomplete and strictly older than 48 hours. Snooze state is
/// not consulted here; see [`evaluate_with`].
pub fn evaluate(now: DateTime<Utc>, todo: &Todo) -> bool {
    evaluate_with(now, todo, overdue_threshold(), SnoozePolicy::Ignore)
}

pub fn evaluate_with(
    now: DateTime<Utc>,
    todo: &Todo,
    threshold: Duration,
    policy: SnoozePolicy,
) -> bool {
    if todo.completed {
        return false;
    }
    if policy == SnoozePolicy::Suppress && is_snoozed(now, todo) {
        return false;
    }
    now - todo.created_at > threshold
}

pub fn is_snoozed(now: DateTime<Utc>, todo: &Todo) -> bool {
    todo.snoozed_until.map_or(false, |until| now < until)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo_aged(now: DateTime<Utc>, age: Duration) -> Todo {
        Todo::new("write report", now - age)
    }

    #[test]
    fn completed_task_is_never_overdue() {
        let now = Utc::now();
        let mut todo = todo_aged(now, Duration::days(30));
        todo.completed = true;
        todo.completed_at = Some(now);

        assert!(!evaluate(now, &todo));
        assert!(!evaluate_with(now, &todo, overdue_threshold(), SnoozePolicy::Ignore));
        assert!(!evaluate_with(now, &todo, overdue_threshold(), SnoozePolicy::Suppress));
    }

    #[test]
    fn just_under_threshold_is_not_overdue() {
        let now = Utc::now();
        let age = Duration::hours(47) + Duration::minutes(59) + Duration::seconds(59);
        assert!(!evaluate(now, &todo_aged(now, age)));
    }

    #[test]
    fn just_over_threshold_is_overdue() {
        let now = Utc::now();
        let age = Duration::hours(48) + Duration::seconds(1);
        assert!(evaluate(now, &todo_aged(now, age)));
    }

    #[test]
    fn exactly_at_threshold_is_not_overdue() {
        let now = Utc::now();
        assert!(!evaluate(now, &todo_aged(now, Duration::hours(48))));
    }

    #[test]
    fn suppress_policy_hides_overdue_inside_snooze_window() {
        let now = Utc::now();
        let mut todo = todo_aged(now, Duration::hours(60));
        todo.snoozed_until = Some(now + Duration::hours(2));

        assert!(!evaluate_with(now, &todo, overdue_threshold(), SnoozePolicy::Suppress));
        let later = now + Duration::hours(2) + Duration::seconds(1);
        assert!(evaluate_with(later, &todo, overdue_threshold(), SnoozePolicy::Suppress));
    }

    #[test]
    fn ignore_policy_recomputes_from_creation_time() {
        let now = Utc::now();
        let mut todo = todo_aged(now, Duration::hours(60));
        todo.snoozed_until = Some(now + Duration::hours(2));

        assert!(evaluate_with(now, &todo, overdue_threshold(), SnoozePolicy::Ignore));
        assert_eq!(
            evaluate(now, &todo),
            evaluate_with(now, &todo, overdue_threshold(), SnoozePolicy::Ignore)
        );
    }

    #[test]
    fn unrepresentable_threshold_falls_back_to_default() {
        assert_eq!(threshold_from_hours(i64::MAX), overdue_threshold());
        assert_eq!(threshold_from_hours(-3), overdue_threshold());
        assert_eq!(threshold_from_hours(12), Duration::hours(12));
    }

    #[test]
    fn custom_threshold_is_respected() {
        let now = Utc::now();
        let todo = todo_aged(now, Duration::hours(5));
        assert!(evaluate_with(now, &todo, Duration::hours(4), SnoozePolicy::Suppress));
        assert!(!evaluate_with(now, &todo, Duration::hours(6), SnoozePolicy::Suppress));
    }
}
