//! Formatting, validation and lookup helpers shared by the CLI and the TUI.

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::fields::DurationClass;
use crate::store::TaskStore;
use crate::task::Task;

/// Shortest id prefix accepted when resolving a task from user input.
pub const MIN_ID_PREFIX: usize = 4;

/// Which tasks a list view shows with respect to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Show {
    #[default]
    Active,
    Completed,
    All,
}

impl Show {
    pub fn admits(self, task: &Task) -> bool {
        match self {
            Show::Active => !task.is_completed(),
            Show::Completed => task.is_completed(),
            Show::All => true,
        }
    }
}

/// Group tasks by duration class (short, medium, long), keeping insertion order inside each
/// group. Every class is present even when its group is empty.
pub fn group_by_duration(
    store: &TaskStore,
    show: Show,
    only: Option<DurationClass>,
) -> Vec<(DurationClass, Vec<&Task>)> {
    DurationClass::ALL
        .iter()
        .copied()
        .filter(|d| only.map_or(true, |o| o == *d))
        .map(|d| (d, store.tasks_in(d).filter(|t| show.admits(t)).collect()))
        .collect()
}

/// Trimmed title, or an error if nothing is left.
pub fn validate_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(Error::Invalid("Title is required".into()));
    }
    Ok(title.to_string())
}

pub fn format_status(completed: bool) -> &'static str {
    if completed { "Completed" } else { "In Progress" }
}

/// Creation date in the local time zone.
pub fn format_created(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Human age such as "just now", "5h", "3d".
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now - created;
    if age.num_days() > 0 {
        format!("{}d", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m", age.num_minutes())
    } else {
        "just now".into()
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Resolve user input to a task id.
///
/// Accepts a full UUID, a case-insensitive title, or a unique id prefix of at least
/// `MIN_ID_PREFIX` hex digits (dashes ignored). Titles are tried before prefixes so a title
/// such as "beef" never resolves to some other task whose id happens to start with it.
pub fn resolve_task_identifier(query: &str, store: &TaskStore) -> Result<Uuid> {
    let query = query.trim();
    if let Ok(id) = Uuid::parse_str(query) {
        return store
            .get(id)
            .map(|t| t.id())
            .ok_or_else(|| Error::TaskNotFound(query.to_string()));
    }

    let needle = query.to_lowercase();
    let by_title: Vec<Uuid> = store
        .list_tasks()
        .iter()
        .filter(|t| t.title().to_lowercase() == needle)
        .map(|t| t.id())
        .collect();
    match by_title.len() {
        0 => {}
        1 => return Ok(by_title[0]),
        n => return Err(Error::AmbiguousTask { query: query.to_string(), count: n }),
    }

    let prefix = query.replace('-', "").to_lowercase();
    if prefix.len() < MIN_ID_PREFIX || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::TaskNotFound(query.to_string()));
    }
    let by_prefix: Vec<Uuid> = store
        .list_tasks()
        .iter()
        .map(|t| t.id())
        .filter(|id| id.simple().to_string().starts_with(&prefix))
        .collect();
    match by_prefix.len() {
        0 => Err(Error::TaskNotFound(query.to_string())),
        1 => Ok(by_prefix[0]),
        n => Err(Error::AmbiguousTask { query: query.to_string(), count: n }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap()
    }

    fn store() -> TaskStore {
        let mut s = TaskStore::in_memory();
        s.add_task_at("Pay rent", "", DurationClass::Short, t0());
        s.add_task_at("Plan trip", "", DurationClass::Long, t0());
        s.add_task_at("pay rent", "duplicate title", DurationClass::Medium, t0());
        s.add_task_at("Fix bike", "", DurationClass::Short, t0());
        s
    }

    #[test]
    fn resolves_full_uuid_and_prefix() {
        let s = store();
        let id = s.list_tasks()[1].id();
        assert_eq!(resolve_task_identifier(&id.to_string(), &s).unwrap(), id);
        let prefix = &id.simple().to_string()[..12];
        assert_eq!(resolve_task_identifier(prefix, &s).unwrap(), id);
    }

    #[test]
    fn hex_looking_title_beats_another_tasks_id_prefix() {
        let mut s = store();
        let plan_trip = s.list_tasks()[1].id();
        let clash = plan_trip.simple().to_string()[..6].to_string();
        let named = s.add_task_at(&clash, "", DurationClass::Short, t0()).id();

        assert_eq!(resolve_task_identifier(&clash, &s).unwrap(), named);
        assert_eq!(resolve_task_identifier(&clash.to_uppercase(), &s).unwrap(), named);
        let longer = &plan_trip.simple().to_string()[..10];
        assert_eq!(resolve_task_identifier(longer, &s).unwrap(), plan_trip);
    }

    #[test]
    fn resolves_unique_title_case_insensitively() {
        let s = store();
        let id = s.list_tasks()[3].id();
        assert_eq!(resolve_task_identifier("FIX BIKE", &s).unwrap(), id);
    }

    #[test]
    fn duplicate_titles_are_ambiguous() {
        let s = store();
        match resolve_task_identifier("Pay Rent", &s) {
            Err(Error::AmbiguousTask { count, .. }) => assert_eq!(count, 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn unknown_query_is_not_found() {
        let s = store();
        assert!(matches!(
            resolve_task_identifier("water plants", &s),
            Err(Error::TaskNotFound(_))
        ));
        let ghost = Uuid::new_v4().to_string();
        assert!(matches!(resolve_task_identifier(&ghost, &s), Err(Error::TaskNotFound(_))));
    }

    #[test]
    fn grouping_keeps_order_and_empty_groups() {
        let mut s = store();
        let fix_bike = s.list_tasks()[3].id();
        s.toggle_completion(fix_bike);

        let groups = group_by_duration(&s, Show::Active, None);
        let shape: Vec<(DurationClass, Vec<&str>)> = groups
            .iter()
            .map(|(d, ts)| (*d, ts.iter().map(|t| t.title()).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (DurationClass::Short, vec!["Pay rent"]),
                (DurationClass::Medium, vec!["pay rent"]),
                (DurationClass::Long, vec!["Plan trip"]),
            ]
        );

        let done = group_by_duration(&s, Show::Completed, Some(DurationClass::Short));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].1.len(), 1);
        assert_eq!(done[0].1[0].title(), "Fix bike");

        let none = group_by_duration(&s, Show::Completed, Some(DurationClass::Long));
        assert!(none[0].1.is_empty());
    }

    #[test]
    fn title_validation_trims() {
        assert_eq!(validate_title("  Call mum ").unwrap(), "Call mum");
        assert!(validate_title("   ").is_err());
        assert!(validate_title("").is_err());
    }

    #[test]
    fn formats_age_and_truncates() {
        assert_eq!(format_age(t0(), t0()), "just now");
        assert_eq!(format_age(t0(), t0() + Duration::minutes(5)), "5m");
        assert_eq!(format_age(t0(), t0() + Duration::hours(30)), "1d");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        assert_eq!(format_status(true), "Completed");
    }
}
