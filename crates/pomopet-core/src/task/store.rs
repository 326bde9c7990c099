//! Write-through task list.
//!
//! Every mutation rewrites the whole list under one key. Storage failures
//! are logged and swallowed: the in-memory list stays authoritative for
//! the rest of the process.

use chrono::Utc;

use super::{decode, encode, Task, TaskId};
use crate::events::Event;
use crate::storage::KvStore;

pub struct TaskStore<S> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
}

impl<S: KvStore> TaskStore<S> {
    /// Read the list stored under `key`. A missing key, a read error or
    /// malformed content all yield an empty list.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = match storage.kv_get(&key) {
            Ok(Some(json)) => decode(&json).unwrap_or_else(|e| {
                tracing::warn!(key = %key, error = %e, "discarding malformed task list");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read task list");
                Vec::new()
            }
        };
        Self { storage, key, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append an open task. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<Event> {
        if text.trim().is_empty() {
            return None;
        }
        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            done: false,
        };
        let event = Event::TaskAdded {
            id: task.id,
            text: task.text.clone(),
            at: Utc::now(),
        };
        self.tasks.push(task);
        self.persist();
        Some(event)
    }

    /// Flip `done`. Going from open to done also yields `TaskCompleted`,
    /// once per such flip.
    pub fn toggle(&mut self, id: TaskId) -> Vec<Event> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Vec::new();
        };
        task.done = !task.done;
        let done = task.done;
        self.persist();

        let at = Utc::now();
        let mut events = vec![Event::TaskToggled { id, done, at }];
        if done {
            events.push(Event::TaskCompleted { id, at });
        }
        events
    }

    /// Delete by id; unknown ids are ignored.
    pub fn remove(&mut self, id: TaskId) -> Option<Event> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return None;
        }
        self.persist();
        Some(Event::TaskDeleted { id, at: Utc::now() })
    }

    fn persist(&self) {
        let result = encode(&self.tasks)
            .map_err(crate::error::CoreError::from)
            .and_then(|json| self.storage.kv_set(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "failed to persist task list");
        }
    }

    /// Creation timestamp, bumped past the newest existing id so two adds
    /// in the same millisecond stay distinct.
    fn next_id(&self) -> TaskId {
        let now = Utc::now().timestamp_millis();
        match self.tasks.iter().map(|t| t.id).max() {
            Some(newest) if newest >= now => newest.saturating_add(1),
            _ => now,
        }
    }
}
