//! The task store.
//!
//! `TaskStore` owns the ordered task collection. It loads once when constructed and writes the
//! whole collection back after every mutation. Persistence is best-effort: a failed load
//! yields an empty list and a failed save is logged, never returned, so the in-memory
//! collection stays the source of truth for the rest of the process.
//!
//! Callers only ever see `&Task`/`&[Task]`; mutation goes through the methods below so no
//! change can skip the save.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::fields::DurationClass;
use crate::persist::{KeyValueStore, MemoryStore, DEFAULT_STORAGE_KEY};
use crate::task::Task;

pub struct TaskStore {
    tasks: Vec<Task>,
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl TaskStore {
    /// Create a store over `backend` using the default key and load whatever it holds.
    pub fn open(backend: impl KeyValueStore + 'static) -> Self {
        Self::open_with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a store over `backend` under `key` and load whatever it holds.
    pub fn open_with_key(backend: impl KeyValueStore + 'static, key: &str) -> Self {
        let mut store = TaskStore {
            tasks: Vec::new(),
            backend: Box::new(backend),
            key: key.to_string(),
        };
        store.load();
        store
    }

    /// An empty store that never touches disk.
    pub fn in_memory() -> Self {
        Self::open(MemoryStore::new())
    }

    /// All tasks in insertion order. Filtering and grouping are up to the caller.
    pub fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks of one duration class, in insertion order.
    pub fn tasks_in(&self, duration: DurationClass) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| t.duration_class() == duration)
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new task created now and persist.
    ///
    /// The title is not validated here; callers reject empty titles before calling.
    pub fn add_task(&mut self, title: &str, description: &str, duration: DurationClass) -> Task {
        self.add_task_at(title, description, duration, Utc::now())
    }

    /// Same as [`TaskStore::add_task`] with an explicit creation time.
    pub fn add_task_at(
        &mut self,
        title: &str,
        description: &str,
        duration: DurationClass,
        now: DateTime<Utc>,
    ) -> Task {
        let task = Task::new(title, description, duration, now);
        debug!(id = %task.id(), duration = %duration, "adding task");
        self.tasks.push(task.clone());
        self.save();
        task
    }

    /// Remove the task with `id`. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: Uuid) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        if self.tasks.len() == before {
            debug!(%id, "delete: no such task");
        } else {
            debug!(%id, "deleted task");
        }
        self.save();
    }

    /// Flip the completion flag of the task with `id`. Unknown ids are ignored.
    pub fn toggle_completion(&mut self, id: Uuid) {
        match self.get_mut(id) {
            Some(task) => {
                task.toggle_completed();
                debug!(%id, completed = task.is_completed(), "toggled task");
            }
            None => debug!(%id, "toggle: no such task"),
        }
        self.save();
    }

    /// Replace title, description and duration class of the task with `id`.
    /// Identity, creation time and completion state are untouched. Unknown ids are ignored.
    pub fn update_task(&mut self, id: Uuid, title: &str, description: &str, duration: DurationClass) {
        match self.get_mut(id) {
            Some(task) => {
                task.set_content(title, description, duration);
                debug!(%id, "updated task");
            }
            None => debug!(%id, "update: no such task"),
        }
        self.save();
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    fn load(&mut self) {
        self.tasks = match self.read_tasks() {
            Ok(Some(tasks)) => {
                info!(count = tasks.len(), key = %self.key, "loaded tasks");
                tasks
            }
            Ok(None) => {
                info!(key = %self.key, "no saved tasks, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(key = %self.key, "Error loading tasks, starting fresh: {e}");
                Vec::new()
            }
        };
    }

    fn read_tasks(&self) -> Result<Option<Vec<Task>>> {
        match self.backend.read(&self.key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self) {
        if let Err(e) = self.write_tasks() {
            warn!(key = %self.key, "Error saving tasks, keeping in-memory copy: {e}");
        }
    }

    fn write_tasks(&self) -> Result<()> {
        let data = serde_json::to_vec_pretty(&self.tasks)?;
        self.backend.write(&self.key, &data)
    }
}
