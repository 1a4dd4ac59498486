//! Enumerations for TUI state management.

use uuid::Uuid;

use crate::fields::DurationClass;

/// Which screen the UI is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    TaskDetail,
    AddTask,
    EditTask,
    Help,
    Confirm,
}

/// One line of the grouped task list.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListEntry {
    /// Group heading with the number of visible tasks in it.
    Header(DurationClass, usize),
    /// Placeholder under a heading with no visible tasks.
    Empty,
    Task(Uuid),
}

impl ListEntry {
    pub fn task_id(&self) -> Option<Uuid> {
        match self {
            ListEntry::Task(id) => Some(*id),
            _ => None,
        }
    }
}

/// Form fields in tab order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormField {
    Title,
    Description,
    Duration,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Duration,
            FormField::Duration => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Duration,
            FormField::Description => FormField::Title,
            FormField::Duration => FormField::Description,
        }
    }
}
