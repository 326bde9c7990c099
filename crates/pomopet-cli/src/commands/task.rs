//! Task management commands for CLI.
//!
//! These operate on the persisted list directly. Completing a task here
//! does not reward the pet; pet stats only exist inside `run`.

use clap::Subcommand;
use pomopet_core::storage::Database;
use pomopet_core::task::{TaskId, TaskStore};
use pomopet_core::{Config, Event};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List tasks in insertion order
    List {
        /// Print the stored JSON array
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between open and done
    Toggle {
        /// Task ID
        id: TaskId,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: TaskId,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut store = TaskStore::load(db, config.tasks.storage_key.clone());

    match action {
        TaskAction::Add { text } => match store.add(&text.join(" ")) {
            Some(Event::TaskAdded { id, .. }) => println!("Task added: {id}"),
            _ => eprintln!("ignored: task text is empty"),
        },
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.tasks())?);
            } else if store.tasks().is_empty() {
                println!("No tasks.");
            } else {
                for task in store.tasks() {
                    println!("{}", crate::render::task_line(task));
                }
            }
        }
        TaskAction::Toggle { id } => {
            let events = store.toggle(id);
            match events.first() {
                Some(Event::TaskToggled { done: true, .. }) => println!("Task {id} done"),
                Some(_) => println!("Task {id} reopened"),
                None => return Err(format!("task not found: {id}").into()),
            }
        }
        TaskAction::Delete { id } => {
            if store.remove(id).is_none() {
                return Err(format!("task not found: {id}").into());
            }
            println!("Task {id} deleted");
        }
    }
    Ok(())
}
