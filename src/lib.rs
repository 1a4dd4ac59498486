//! # tick
//!
//! A personal task tracker for short-lived tasks. Each task carries a coarse duration class
//! (short, medium or long) and turns yellow, orange and finally red as it outlives that
//! estimate. Urgency is derived from the task's age every time it is shown; nothing about it
//! is stored.
//!
//! ## Pieces
//!
//! - [`task::Task`]: the entity. `id` and `creation_timestamp` never change.
//! - [`urgency`]: the pure age-to-urgency mapping, with `now` passed in.
//! - [`store::TaskStore`]: the ordered collection. Loads once, saves the whole collection
//!   after every mutation, never surfaces persistence errors.
//! - [`persist`]: where the collection lives, behind the `KeyValueStore` trait.
//! - [`cmd`] and [`tui`]: command-line and interactive front ends over the store.
//!
//! ```no_run
//! use tick::fields::DurationClass;
//! use tick::persist::FileStore;
//! use tick::store::TaskStore;
//!
//! let mut store = TaskStore::open(FileStore::new("/tmp/tick"));
//! let task = store.add_task("Reply to landlord", "", DurationClass::Short);
//! store.toggle_completion(task.id());
//! ```
//!
//! Data is stored in `~/.tick/tasks.json` unless `--data-dir` or `TICK_DATA_DIR` says otherwise.

pub mod cli;
pub mod cmd;
pub mod config;
pub mod display;
pub mod error;
pub mod fields;
pub mod logging;
pub mod persist;
pub mod store;
pub mod task;
pub mod urgency;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}
