//! Task data structure.
//!
//! A `Task` has two identity fields that are fixed at construction (`id` and
//! `creation_timestamp`) and four content fields that the store may rewrite. The fields are
//! private so the only way to change a task is through `crate::store::TaskStore`, which
//! persists after every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fields::{DurationClass, UrgencyLevel};
use crate::urgency;

/// A single short-lived task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: Uuid,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(alias = "duration")]
    duration_class: DurationClass,
    #[serde(default)]
    is_completed: bool,
    creation_timestamp: DateTime<Utc>,
}

impl Task {
    /// Build a fresh, incomplete task created at `now`.
    pub fn new(title: &str, description: &str, duration_class: DurationClass, now: DateTime<Utc>) -> Self {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            duration_class,
            is_completed: false,
            creation_timestamp: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration_class(&self) -> DurationClass {
        self.duration_class
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn creation_timestamp(&self) -> DateTime<Utc> {
        self.creation_timestamp
    }

    /// Urgency as of `now`. Never cached; call again whenever the clock moves.
    pub fn urgency_at(&self, now: DateTime<Utc>) -> UrgencyLevel {
        urgency::urgency_level(self, now)
    }

    /// First eight hex digits of the id, enough to tell tasks apart on screen.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub(crate) fn set_content(&mut self, title: &str, description: &str, duration_class: DurationClass) {
        self.title = title.to_string();
        self.description = description.to_string();
        self.duration_class = duration_class;
    }

    pub(crate) fn toggle_completed(&mut self) {
        self.is_completed = !self.is_completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn new_task_starts_incomplete() {
        let t = Task::new("Buy milk", "", DurationClass::Short, created());
        assert_eq!(t.title(), "Buy milk");
        assert_eq!(t.description(), "");
        assert!(!t.is_completed());
        assert_eq!(t.creation_timestamp(), created());
        assert_eq!(t.short_id().len(), 8);
    }

    #[test]
    fn ids_are_unique() {
        let a = Task::new("a", "", DurationClass::Long, created());
        let b = Task::new("a", "", DurationClass::Long, created());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn serialises_with_camel_case_record_keys() {
        let t = Task::new("Write report", "quarterly", DurationClass::Medium, created());
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["title"], "Write report");
        assert_eq!(value["description"], "quarterly");
        assert_eq!(value["durationClass"], "medium");
        assert_eq!(value["isCompleted"], false);
        assert_eq!(value["creationTimestamp"], "2024-03-01T09:30:00Z");
        assert_eq!(value["id"], t.id().to_string());
    }

    #[test]
    fn decodes_legacy_records_with_missing_fields() {
        let json = r#"{
            "id": "6f1c1c3e-6a1d-4c53-9d0b-1f0e5a9a2b11",
            "title": "Old task",
            "duration": "Long",
            "creationTimestamp": "2023-12-24T18:00:00Z"
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.duration_class(), DurationClass::Long);
        assert_eq!(t.description(), "");
        assert!(!t.is_completed());
    }

    #[test]
    fn set_content_leaves_identity_alone() {
        let mut t = Task::new("a", "b", DurationClass::Short, created());
        t.toggle_completed();
        let (id, ts) = (t.id(), t.creation_timestamp());
        t.set_content("c", "d", DurationClass::Long);
        assert_eq!((t.id(), t.creation_timestamp()), (id, ts));
        assert_eq!(t.title(), "c");
        assert_eq!(t.description(), "d");
        assert_eq!(t.duration_class(), DurationClass::Long);
        assert!(t.is_completed());
    }
}
