//! Persisted to-do list.

mod store;

use serde::{Deserialize, Serialize};

pub use store::TaskStore;

/// Creation time in epoch milliseconds, unique within one list.
pub type TaskId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
}

/// Serialize a list to the stored JSON array form.
pub fn encode(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

/// Parse the stored JSON array form.
pub fn decode(json: &str) -> serde_json::Result<Vec<Task>> {
    serde_json::from_str(json)
}
