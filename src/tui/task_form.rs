//! Task form handling for the terminal user interface.
//!
//! The same form backs "add" and "edit". It only collects and validates input; the app
//! passes the validated values to the store.

use crate::display::validate_title;
use crate::error::Result;
use crate::fields::DurationClass;
use crate::task::Task;
use crate::tui::{enums::FormField, input::InputField};

/// Values ready to hand to `TaskStore::add_task` or `TaskStore::update_task`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub title: String,
    pub description: String,
    pub duration: DurationClass,
}

pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub duration: DurationClass,
    pub current_field: FormField,
    /// Set after a rejected submit; shown under the title field.
    pub error: Option<String>,
}

impl TaskForm {
    /// Empty form for a new task. Duration defaults to medium.
    pub fn new() -> Self {
        Self {
            title: InputField::new(),
            description: InputField::new(),
            duration: DurationClass::default(),
            current_field: FormField::Title,
            error: None,
        }
    }

    /// Form pre-filled from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: InputField::with_value(task.title()),
            description: InputField::with_value(task.description()),
            duration: task.duration_class(),
            ..Self::new()
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
    }

    pub fn prev_field(&mut self) {
        self.current_field = self.current_field.prev();
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Duration => None,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_delete();
        }
    }

    /// Move the cursor in text fields, or cycle the duration selector.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            FormField::Duration => {
                self.duration = if right { self.duration.next() } else { self.duration.prev() };
            }
            _ => {
                if let Some(field) = self.active_input() {
                    if right {
                        field.move_cursor_right()
                    } else {
                        field.move_cursor_left()
                    }
                }
            }
        }
    }

    /// Validate the form. On failure the error is also kept on the form for display and the
    /// title field is focused.
    pub fn submit(&mut self) -> Result<FormValues> {
        match validate_title(&self.title.value) {
            Ok(title) => {
                self.error = None;
                Ok(FormValues {
                    title,
                    description: self.description.value.trim().to_string(),
                    duration: self.duration,
                })
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.current_field = FormField::Title;
                Err(e)
            }
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn type_str(form: &mut TaskForm, s: &str) {
        for c in s.chars() {
            form.handle_char(c);
        }
    }

    #[test]
    fn empty_title_is_rejected_and_focused() {
        let mut form = TaskForm::new();
        form.next_field();
        type_str(&mut form, "some notes");
        assert!(form.submit().is_err());
        assert_eq!(form.error.as_deref(), Some("Title is required"));
        assert_eq!(form.current_field, FormField::Title);
    }

    #[test]
    fn submit_collects_trimmed_values() {
        let mut form = TaskForm::new();
        type_str(&mut form, " Buy bread ");
        form.next_field();
        type_str(&mut form, "sourdough");
        form.next_field();
        form.handle_left_right(true);
        form.handle_char('x');
        let values = form.submit().unwrap();
        assert_eq!(
            values,
            FormValues {
                title: "Buy bread".into(),
                description: "sourdough".into(),
                duration: DurationClass::Long,
            }
        );
        assert!(form.error.is_none());
    }

    #[test]
    fn edit_form_starts_from_task() {
        let task = Task::new("Sort photos", "2023 trip", DurationClass::Short, Utc::now());
        let mut form = TaskForm::from_task(&task);
        assert_eq!(form.title.value, "Sort photos");
        assert_eq!(form.duration, DurationClass::Short);
        form.prev_field();
        form.handle_left_right(false);
        assert_eq!(form.duration, DurationClass::Long);
    }
}
