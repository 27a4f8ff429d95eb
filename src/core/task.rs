use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::ValidationError;
use crate::storage::{Storage, StorageError, TASKS_KEY};

/// A task item. Tasks carry an optional time range but no date: the list
/// is global and shown against "today" (see `core::day::aggregate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub completed: bool,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl Task {
    /// Hours between start and end, floored at zero. Tasks missing either
    /// endpoint contribute nothing.
    pub fn worked_hours(&self) -> f64 {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end > start => {
                (end - start).num_minutes() as f64 / 60.0
            }
            _ => 0.0,
        }
    }
}

/// The user's task list. Ids are unique positive integers assigned
/// max-plus-one; the list persists across sessions via the storage
/// adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

fn seed_task(id: u32, title: &str, completed: bool, start: (u32, u32), end: (u32, u32)) -> Task {
    Task {
        id,
        title: title.to_string(),
        completed,
        start: NaiveTime::from_hms_opt(start.0, start.1, 0),
        end: NaiveTime::from_hms_opt(end.0, end.1, 0),
    }
}

/// The built-in list used when nothing has been persisted yet or the
/// persisted data cannot be read.
pub fn default_tasks() -> Vec<Task> {
    vec![
        seed_task(1, "Morning Exercise", false, (6, 0), (7, 0)),
        seed_task(2, "Team Meeting", true, (10, 0), (11, 0)),
        seed_task(3, "Health Check-up", false, (14, 0), (15, 0)),
        seed_task(4, "Evening Walk", false, (18, 0), (18, 30)),
    ]
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            tasks: default_tasks(),
        }
    }
}

impl TaskStore {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Load the persisted list, falling back to the defaults on a missing
    /// key, a read failure, or corrupt data. Never fails startup.
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.load(TASKS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(tasks) => Self::from_tasks(tasks),
                Err(err) => {
                    log::warn!("Corrupt task list, using defaults: {}", err);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("Failed to load task list, using defaults: {}", err);
                Self::default()
            }
        }
    }

    /// Write the full list. Callers invoke this after every mutation;
    /// the in-memory list stays authoritative even when the write fails.
    pub fn persist(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.tasks).map_err(StorageError::Serialize)?;
        storage.save(TASKS_KEY, &json)
    }

    fn next_id(&self) -> u32 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Append a new incomplete task, returning a copy of it.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    ) -> Result<Task, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let task = Task {
            id: self.next_id(),
            title,
            completed: false,
            start,
            end,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Flip `completed` on the matching task. An unknown id is a benign
    /// no-op (the task may have been removed moments earlier).
    pub fn toggle_task(&mut self, id: u32) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
        }
    }

    /// Remove by id; absent ids are a no-op.
    pub fn remove_task(&mut self, id: u32) {
        self.tasks.retain(|t| t.id != id);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
