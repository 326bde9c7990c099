//! Countdown clock primitive.
//!
//! The clock has no notion of wall time. Each call to [`Clock::tick`]
//! accounts for exactly one second; the caller decides when a second has
//! passed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    remaining_secs: u64,
    running: bool,
}

impl Clock {
    /// A paused clock holding `remaining_secs`.
    pub fn new(remaining_secs: u64) -> Self {
        Self {
            remaining_secs,
            running: false,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns `true` if the clock went from paused to running.
    ///
    /// A zeroed clock cannot be started; the pending transition has to be
    /// resolved by a tick first.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_secs == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Returns `true` if the clock went from running to paused.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Stop and load a new countdown value.
    pub fn load(&mut self, remaining_secs: u64) {
        self.running = false;
        self.remaining_secs = remaining_secs;
    }

    /// Account for one elapsed second.
    ///
    /// Returns `true` when the clock is running and sits at zero after the
    /// decrement, i.e. on the zero-crossing.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.remaining_secs == 0
    }

    /// Shift the countdown by whole minutes, never going below `floor_secs`.
    pub fn adjust(&mut self, delta_minutes: i64, floor_secs: u64) -> u64 {
        let delta_secs = delta_minutes.saturating_mul(60);
        let adjusted = if delta_secs.is_negative() {
            self.remaining_secs.saturating_sub(delta_secs.unsigned_abs())
        } else {
            self.remaining_secs.saturating_add(delta_secs as u64)
        };
        self.remaining_secs = adjusted.max(floor_secs);
        self.remaining_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_only_counts_while_running() {
        let mut clock = Clock::new(3);
        assert!(!clock.tick());
        assert_eq!(clock.remaining_secs(), 3);

        assert!(clock.start());
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert!(clock.tick());
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn zeroed_clock_refuses_to_start() {
        let mut clock = Clock::new(0);
        assert!(!clock.start());
        assert!(!clock.is_running());
    }

    #[test]
    fn start_and_pause_report_changes_only() {
        let mut clock = Clock::new(10);
        assert!(clock.start());
        assert!(!clock.start());
        assert!(clock.pause());
        assert!(!clock.pause());
    }

    #[test]
    fn adjust_respects_floor() {
        let mut clock = Clock::new(90);
        assert_eq!(clock.adjust(-100, 60), 60);
        assert_eq!(clock.adjust(2, 60), 180);
    }

    #[test]
    fn adjust_has_no_upper_bound() {
        let mut clock = Clock::new(1500);
        assert_eq!(clock.adjust(600, 60), 1500 + 36_000);
    }

    #[test]
    fn adjust_survives_extreme_deltas() {
        let mut clock = Clock::new(1500);
        assert_eq!(clock.adjust(i64::MIN, 60), 60);
        assert_eq!(clock.adjust(i64::MAX, 60), 60 + i64::MAX as u64);
    }
}
