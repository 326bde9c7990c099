//! Focus/break mode controller.
//!
//! ## State Transitions
//!
//! ```text
//! Focus(paused) <-> Focus(running) --zero--> Break(paused)
//! Break(paused) <-> Break(running) --zero--> Focus(paused)
//! ```
//!
//! The zero-crossing is the only transition with a side effect: the
//! notifier is poked and the next mode is loaded, paused.

use serde::{Deserialize, Serialize};

use super::clock::Clock;
use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    pub fn flipped(self) -> Self {
        match self {
            Mode::Focus => Mode::Break,
            Mode::Break => Mode::Focus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "FOCUS TIME!",
            Mode::Break => "BREAK TIME!",
        }
    }
}

/// `adjust` never leaves less than this on the clock.
pub const MIN_ADJUST_FLOOR_SECS: u64 = 60;

/// Durations driving the controller, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_secs: u64,
    pub break_secs: u64,
    /// Lowest value `adjust` may leave on the clock. Raised to
    /// [`MIN_ADJUST_FLOOR_SECS`] when lower.
    pub adjust_floor_secs: u64,
}

impl TimerSettings {
    pub fn duration_secs(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Focus => self.focus_secs,
            Mode::Break => self.break_secs,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            break_secs: 5 * 60,
            adjust_floor_secs: MIN_ADJUST_FLOOR_SECS,
        }
    }
}

/// Read-only view of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub mode: Mode,
    pub remaining_secs: u64,
    pub running: bool,
}

/// A completed mode flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    pub duration_secs: u64,
}

impl Transition {
    /// Whether this transition closed out a focus interval.
    pub fn completed_focus(&self) -> bool {
        self.from == Mode::Focus && self.to == Mode::Break
    }
}

#[derive(Debug, Clone)]
pub struct ModeController {
    settings: TimerSettings,
    mode: Mode,
    clock: Clock,
}

impl ModeController {
    /// Starts paused in focus mode with a full focus interval.
    pub fn new(mut settings: TimerSettings) -> Self {
        settings.adjust_floor_secs = settings.adjust_floor_secs.max(MIN_ADJUST_FLOOR_SECS);
        Self {
            settings,
            mode: Mode::Focus,
            clock: Clock::new(settings.focus_secs),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.clock.remaining_secs()
    }

    pub fn session(&self) -> Session {
        Session {
            mode: self.mode,
            remaining_secs: self.clock.remaining_secs(),
            running: self.clock.is_running(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> bool {
        self.clock.start()
    }

    pub fn pause(&mut self) -> bool {
        self.clock.pause()
    }

    /// Back to a paused, full focus interval regardless of current mode.
    pub fn reset(&mut self) {
        self.mode = Mode::Focus;
        self.clock.load(self.settings.focus_secs);
    }

    pub fn adjust(&mut self, delta_minutes: i64) -> u64 {
        self.clock.adjust(delta_minutes, self.settings.adjust_floor_secs)
    }

    /// Account for one second. Returns the transition when this tick was
    /// the zero-crossing.
    pub fn tick(&mut self, notifier: &dyn Notifier) -> Option<Transition> {
        if !self.clock.tick() {
            return None;
        }

        notifier.notify_transition();

        let from = self.mode;
        let to = from.flipped();
        let duration_secs = self.settings.duration_secs(to);
        self.mode = to;
        self.clock.load(duration_secs);

        tracing::debug!(?from, ?to, duration_secs, "mode transition");
        Some(Transition {
            from,
            to,
            duration_secs,
        })
    }
}
