//! Time-derived urgency.
//!
//! Urgency depends only on the task's duration class and the number of whole days since it
//! was created. `now` is always a parameter so callers (and tests) control the clock.

use chrono::{DateTime, Utc};

use crate::fields::{DurationClass, UrgencyLevel};
use crate::task::Task;

/// Days-elapsed thresholds for one duration class. `None` means the class skips that tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub yellow: i64,
    pub orange: Option<i64>,
    pub red: i64,
}

pub const SHORT: Thresholds = Thresholds { yellow: 1, orange: None, red: 2 };
pub const MEDIUM: Thresholds = Thresholds { yellow: 2, orange: Some(3), red: 4 };
pub const LONG: Thresholds = Thresholds { yellow: 4, orange: Some(5), red: 6 };

pub fn thresholds(duration: DurationClass) -> Thresholds {
    match duration {
        DurationClass::Short => SHORT,
        DurationClass::Medium => MEDIUM,
        DurationClass::Long => LONG,
    }
}

/// Whole days between `created` and `now`, clamped at zero if the clock runs backwards.
pub fn days_elapsed(created: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created).num_days().max(0)
}

/// Map a duration class and an age in days onto an urgency level.
///
/// Tiers are checked from red downwards so the most severe match wins.
pub fn urgency_for(duration: DurationClass, days: i64) -> UrgencyLevel {
    let t = thresholds(duration);
    if days >= t.red {
        UrgencyLevel::Red
    } else if t.orange.is_some_and(|orange| days >= orange) {
        UrgencyLevel::Orange
    } else if days >= t.yellow {
        UrgencyLevel::Yellow
    } else {
        UrgencyLevel::Normal
    }
}

pub fn urgency_level(task: &Task, now: DateTime<Utc>) -> UrgencyLevel {
    urgency_for(task.duration_class(), days_elapsed(task.creation_timestamp(), now))
}

/// One-line description of when a class changes colour, e.g. for help screens.
pub fn describe(duration: DurationClass) -> String {
    let t = thresholds(duration);
    match t.orange {
        Some(orange) => format!(
            "yellow after {} {}, orange after {}, red after {}",
            t.yellow,
            plural_days(t.yellow),
            orange,
            t.red
        ),
        None => format!(
            "yellow after {} {}, red after {} {}",
            t.yellow,
            plural_days(t.yellow),
            t.red,
            plural_days(t.red)
        ),
    }
}

fn plural_days(n: i64) -> &'static str {
    if n == 1 { "day" } else { "days" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn short_has_no_orange_tier() {
        use UrgencyLevel::*;
        let d = DurationClass::Short;
        assert_eq!(urgency_for(d, 0), Normal);
        assert_eq!(urgency_for(d, 1), Yellow);
        assert_eq!(urgency_for(d, 2), Red);
        assert_eq!(urgency_for(d, 100), Red);
    }

    #[test]
    fn medium_thresholds() {
        use UrgencyLevel::*;
        let d = DurationClass::Medium;
        assert_eq!(urgency_for(d, 0), Normal);
        assert_eq!(urgency_for(d, 1), Normal);
        assert_eq!(urgency_for(d, 2), Yellow);
        assert_eq!(urgency_for(d, 3), Orange);
        assert_eq!(urgency_for(d, 4), Red);
    }

    #[test]
    fn long_thresholds() {
        use UrgencyLevel::*;
        let d = DurationClass::Long;
        assert_eq!(urgency_for(d, 3), Normal);
        assert_eq!(urgency_for(d, 4), Yellow);
        assert_eq!(urgency_for(d, 5), Orange);
        assert_eq!(urgency_for(d, 6), Red);
        assert_eq!(urgency_for(d, 30), Red);
    }

    #[test]
    fn days_elapsed_floors_and_clamps() {
        assert_eq!(days_elapsed(t0(), t0()), 0);
        assert_eq!(days_elapsed(t0(), t0() + Duration::hours(23)), 0);
        assert_eq!(days_elapsed(t0(), t0() + Duration::hours(36)), 1);
        assert_eq!(days_elapsed(t0(), t0() + Duration::hours(48)), 2);
        assert_eq!(days_elapsed(t0(), t0() - Duration::days(3)), 0);
    }

    #[test]
    fn short_task_ages_through_its_tiers() {
        let task = Task::new("Reply to email", "", DurationClass::Short, t0());
        assert_eq!(task.urgency_at(t0()), UrgencyLevel::Normal);
        assert_eq!(task.urgency_at(t0() + Duration::hours(36)), UrgencyLevel::Yellow);
        assert_eq!(task.urgency_at(t0() + Duration::hours(48)), UrgencyLevel::Red);
    }

    #[test]
    fn clock_before_creation_is_normal() {
        let task = Task::new("Future", "", DurationClass::Short, t0());
        assert_eq!(urgency_level(&task, t0() - Duration::days(10)), UrgencyLevel::Normal);
    }

    #[test]
    fn legend_text() {
        assert_eq!(describe(DurationClass::Short), "yellow after 1 day, red after 2 days");
        assert_eq!(
            describe(DurationClass::Medium),
            "yellow after 2 days, orange after 3, red after 4"
        );
        assert_eq!(
            describe(DurationClass::Long),
            "yellow after 4 days, orange after 5, red after 6"
        );
    }
}
