//! # Pomopet Core Library
//!
//! The session/state engine behind the Pomopet widget: a Pomodoro focus
//! timer, a virtual pet whose stats follow your focus sessions, and a
//! persisted task list. Rendering lives elsewhere; this crate exposes a
//! snapshot to draw and a set of intents to apply.
//!
//! ## Architecture
//!
//! - **Timer**: countdown clock plus the focus/break mode controller
//! - **Pet**: energy/happiness stats and the gated play action
//! - **Tasks**: write-through task list over a key-value store
//! - **Scheduler**: virtual-time jobs; the caller decides when time moves
//! - **Storage**: SQLite key-value table and TOML configuration
//!
//! ## Key Components
//!
//! - [`Engine`]: owns everything and applies [`Intent`]s
//! - [`drive`]: async loop feeding wall-clock time into an engine
//! - [`Database`]: durable storage for the task list
//! - [`Config`]: application configuration management

pub mod driver;
pub mod engine;
pub mod error;
pub mod events;
pub mod notify;
pub mod pet;
pub mod scheduler;
pub mod storage;
pub mod task;
pub mod timer;

pub use driver::drive;
pub use engine::{Engine, EngineConfig, Intent, Snapshot};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use notify::{Notifier, SilentNotifier, SoundNotifier};
pub use pet::{PetSettings, PetStats, StatEngine};
pub use storage::{Config, Database, KvStore, MemoryKv};
pub use task::{Task, TaskId, TaskStore};
pub use timer::{Mode, ModeController, Session, TimerSettings, Transition};
