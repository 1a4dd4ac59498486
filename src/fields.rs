//! Enumerations used to classify tasks.
//!
//! `DurationClass` is chosen by the user when a task is created. `UrgencyLevel` is never
//! stored; it is derived from the duration class and the task's age (see `crate::urgency`).

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Coarse estimate of how quickly a task should be completed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum DurationClass {
    #[serde(alias = "Short")]
    Short,
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Long")]
    Long,
}

impl DurationClass {
    /// All classes in display order.
    pub const ALL: [DurationClass; 3] = [DurationClass::Short, DurationClass::Medium, DurationClass::Long];

    pub fn label(self) -> &'static str {
        match self {
            DurationClass::Short => "Short",
            DurationClass::Medium => "Medium",
            DurationClass::Long => "Long",
        }
    }

    /// The next class in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            DurationClass::Short => DurationClass::Medium,
            DurationClass::Medium => DurationClass::Long,
            DurationClass::Long => DurationClass::Short,
        }
    }

    /// The previous class in display order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            DurationClass::Short => DurationClass::Long,
            DurationClass::Medium => DurationClass::Short,
            DurationClass::Long => DurationClass::Medium,
        }
    }
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How overdue a task looks, from calm to alarming.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyLevel {
    Normal,
    Yellow,
    Orange,
    Red,
}

impl UrgencyLevel {
    pub fn label(self) -> &'static str {
        match self {
            UrgencyLevel::Normal => "Normal",
            UrgencyLevel::Yellow => "Yellow",
            UrgencyLevel::Orange => "Orange",
            UrgencyLevel::Red => "Red",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_tags_accept_legacy_capitalisation() {
        let parsed: Vec<DurationClass> =
            serde_json::from_str(r#"["short", "Medium", "Long"]"#).unwrap();
        assert_eq!(parsed, DurationClass::ALL.to_vec());
        assert_eq!(serde_json::to_string(&DurationClass::Long).unwrap(), "\"long\"");
    }

    #[test]
    fn cycling_visits_every_class() {
        let mut d = DurationClass::Short;
        for expected in [DurationClass::Medium, DurationClass::Long, DurationClass::Short] {
            d = d.next();
            assert_eq!(d, expected);
        }
        assert_eq!(DurationClass::Short.prev(), DurationClass::Long);
        assert_eq!(DurationClass::default(), DurationClass::Medium);
    }

    #[test]
    fn urgency_levels_are_ordered_by_severity() {
        assert!(UrgencyLevel::Normal < UrgencyLevel::Yellow);
        assert!(UrgencyLevel::Yellow < UrgencyLevel::Orange);
        assert!(UrgencyLevel::Orange < UrgencyLevel::Red);
    }
}
