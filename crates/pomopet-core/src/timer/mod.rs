mod clock;
mod controller;

pub use clock::Clock;
pub use controller::{Mode, MIN_ADJUST_FLOOR_SECS, ModeController, Session, TimerSettings, Transition};
