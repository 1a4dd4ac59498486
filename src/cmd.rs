//! Command implementations for the CLI interface.
//!
//! Each handler resolves its arguments, calls one store operation and prints the result.
//! The store persists on its own; handlers never save.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use crossterm::style::{Color, Stylize};

use crate::cli::Cli;
use crate::display::{
    format_age, format_created, format_status, group_by_duration, resolve_task_identifier,
    truncate, validate_title, Show,
};
use crate::error::{Error, Result};
use crate::fields::{DurationClass, UrgencyLevel};
use crate::store::TaskStore;
use crate::task::Task;
use crate::urgency;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (default).
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Duration class: short | medium | long.
        #[arg(long, value_enum, default_value_t = DurationClass::Medium)]
        duration: DurationClass,
    },

    /// List tasks grouped by duration class.
    List {
        /// Include completed tasks.
        #[arg(long, conflicts_with = "completed")]
        all: bool,
        /// Show only completed tasks.
        #[arg(long)]
        completed: bool,
        /// Only show one duration class.
        #[arg(long, value_enum)]
        duration: Option<DurationClass>,
    },

    /// View a single task by id, id prefix or title.
    View {
        id: String,
    },

    /// Update fields on a task. Omitted fields keep their current value.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        duration: Option<DurationClass>,
    },

    /// Mark a task done, or not done if it already is.
    Toggle {
        id: String,
    },

    /// Delete a task.
    Delete {
        id: String,
    },

    /// Show when each duration class changes colour.
    Legend,

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn cmd_add(store: &mut TaskStore, title: String, desc: String, duration: DurationClass) -> Result<()> {
    let title = validate_title(&title)?;
    let task = store.add_task(&title, desc.trim(), duration);
    println!("Added {} [{}] {}", task.short_id(), task.duration_class(), task.title());
    Ok(())
}

pub fn cmd_list(store: &TaskStore, all: bool, completed: bool, duration: Option<DurationClass>) -> Result<()> {
    let show = if all {
        Show::All
    } else if completed {
        Show::Completed
    } else {
        Show::Active
    };
    let now = Utc::now();
    let mut out = io::stdout().lock();
    for (class, tasks) in group_by_duration(store, show, duration) {
        writeln!(out, "{}", class.label().bold())?;
        if tasks.is_empty() {
            writeln!(out, "  {}", "No tasks".dark_grey())?;
        }
        for task in tasks {
            writeln!(out, "{}", task_row(task, now))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn cmd_view(store: &TaskStore, id: String) -> Result<()> {
    let id = resolve_task_identifier(&id, store)?;
    let task = store.get(id).ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
    let now = Utc::now();
    let level = task.urgency_at(now);

    println!("{}", task.title().bold());
    println!("Id:        {}", task.id());
    println!("Created:   {} ({} ago)", format_created(task.creation_timestamp()), format_age(task.creation_timestamp(), now));
    println!("Duration:  {}", task.duration_class());
    println!("Status:    {}", format_status(task.is_completed()));
    println!("Urgency:   {}", level.label().with(urgency_color(level)));
    println!();
    if task.description().is_empty() {
        println!("{}", "No description provided".dark_grey());
    } else {
        println!("{}", task.description());
    }
    Ok(())
}

pub fn cmd_update(
    store: &mut TaskStore,
    id: String,
    title: Option<String>,
    desc: Option<String>,
    duration: Option<DurationClass>,
) -> Result<()> {
    let id = resolve_task_identifier(&id, store)?;
    let current = store.get(id).ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
    let title = match title {
        Some(t) => validate_title(&t)?,
        None => current.title().to_string(),
    };
    let desc = desc.map(|d| d.trim().to_string()).unwrap_or_else(|| current.description().to_string());
    let duration = duration.unwrap_or(current.duration_class());

    store.update_task(id, &title, &desc, duration);
    println!("Updated {}", title);
    Ok(())
}

pub fn cmd_toggle(store: &mut TaskStore, id: String) -> Result<()> {
    let id = resolve_task_identifier(&id, store)?;
    store.toggle_completion(id);
    if let Some(task) = store.get(id) {
        println!("{}: {}", task.title(), format_status(task.is_completed()));
    }
    Ok(())
}

pub fn cmd_delete(store: &mut TaskStore, id: String) -> Result<()> {
    let id = resolve_task_identifier(&id, store)?;
    let title = store.get(id).map(|t| t.title().to_string()).unwrap_or_default();
    store.delete_task(id);
    println!("Deleted {}", title);
    Ok(())
}

pub fn cmd_legend() {
    println!("Task urgency is calculated from duration:");
    for class in DurationClass::ALL {
        println!("  {:<7} {}", format!("{}:", class.label()), urgency::describe(class));
    }
}

pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Colour used to signal an urgency level; normal tasks get a reassuring green.
pub fn urgency_color(level: UrgencyLevel) -> Color {
    match level {
        UrgencyLevel::Normal => Color::Green,
        UrgencyLevel::Yellow => Color::Yellow,
        UrgencyLevel::Orange => Color::Rgb { r: 255, g: 140, b: 0 },
        UrgencyLevel::Red => Color::Red,
    }
}

fn task_row(task: &Task, now: DateTime<Utc>) -> String {
    let level = task.urgency_at(now);
    let marker = if task.is_completed() { "✓" } else { "●" };
    let title = truncate(task.title(), 48);
    let title = if task.is_completed() {
        title.dark_grey().crossed_out().to_string()
    } else {
        title
    };
    format!(
        "  {} {} {:<48} {}",
        marker.with(urgency_color(level)),
        task.short_id().dark_grey(),
        title,
        format_created(task.creation_timestamp()).dark_grey()
    )
}
