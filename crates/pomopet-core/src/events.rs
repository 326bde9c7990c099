use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::TaskId;
use crate::timer::Mode;

/// Every state change in the engine produces an Event.
/// The rendering shell may log or react to them; the engine itself uses
/// `TaskCompleted` to feed the pet's happiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    TimerAdjusted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Zero-crossing resolved. `play_unlocked` is set when a focus
    /// interval was completed.
    ModeChanged {
        from: Mode,
        to: Mode,
        duration_secs: u64,
        play_unlocked: bool,
        at: DateTime<Utc>,
    },
    EnergyDrained {
        energy: u32,
        at: DateTime<Utc>,
    },
    PetPlayed {
        energy: u32,
        happiness: u32,
        at: DateTime<Utc>,
    },
    PlayEnded {
        at: DateTime<Utc>,
    },
    TaskAdded {
        id: TaskId,
        text: String,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: TaskId,
        done: bool,
        at: DateTime<Utc>,
    },
    /// A task went from open to done.
    TaskCompleted {
        id: TaskId,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        id: TaskId,
        at: DateTime<Utc>,
    },
}
