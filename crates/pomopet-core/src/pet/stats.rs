//! Energy/happiness model for the pet.
//!
//! Stats are derived purely from engine activity: focus time drains
//! energy, finished tasks raise happiness, and a completed focus interval
//! unlocks a single play action that boosts both.

use serde::{Deserialize, Serialize};

use crate::timer::{Mode, Session, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSettings {
    /// Upper bound for both stats.
    pub max_stat: u32,
    pub initial_energy: u32,
    pub initial_happiness: u32,
    /// Seconds of uninterrupted running focus per energy point lost.
    pub drain_interval_secs: u64,
    pub task_reward: u32,
    pub play_reward: u32,
    /// How long the cosmetic "playing" flag stays up.
    pub play_duration_ms: u64,
}

impl Default for PetSettings {
    fn default() -> Self {
        Self {
            max_stat: 100,
            initial_energy: 50,
            initial_happiness: 30,
            drain_interval_secs: 60,
            task_reward: 20,
            play_reward: 20,
            play_duration_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetStats {
    pub energy: u32,
    pub happiness: u32,
    pub can_play: bool,
    pub is_playing: bool,
    /// Animation frame flag, no effect on the other fields.
    #[serde(default)]
    pub bouncing: bool,
}

#[derive(Debug, Clone)]
pub struct StatEngine {
    settings: PetSettings,
    stats: PetStats,
}

impl StatEngine {
    pub fn new(settings: PetSettings) -> Self {
        let stats = PetStats {
            energy: settings.initial_energy.min(settings.max_stat),
            happiness: settings.initial_happiness.min(settings.max_stat),
            can_play: false,
            is_playing: false,
            bouncing: false,
        };
        Self { settings, stats }
    }

    pub fn stats(&self) -> &PetStats {
        &self.stats
    }

    /// A finished focus interval unlocks play. Other transitions leave the
    /// gate untouched.
    pub fn on_transition(&mut self, transition: &Transition) {
        if transition.completed_focus() {
            self.stats.can_play = true;
        }
    }

    /// One drain interval of focus time has passed. Returns the new energy
    /// when the session is actually focusing, `None` otherwise.
    pub fn on_focus_tick(&mut self, session: &Session) -> Option<u32> {
        if session.mode != Mode::Focus || !session.running {
            return None;
        }
        self.stats.energy = self.stats.energy.saturating_sub(1);
        Some(self.stats.energy)
    }

    pub fn on_task_completed(&mut self) {
        self.stats.happiness = self.boosted(self.stats.happiness, self.settings.task_reward);
    }

    /// Consume the play unlock. Returns `false` while locked.
    pub fn play(&mut self) -> bool {
        if !self.stats.can_play {
            return false;
        }
        self.stats.can_play = false;
        self.stats.is_playing = true;
        self.stats.energy = self.boosted(self.stats.energy, self.settings.play_reward);
        self.stats.happiness = self.boosted(self.stats.happiness, self.settings.play_reward);
        true
    }

    pub fn end_play(&mut self) {
        self.stats.is_playing = false;
    }

    pub fn set_bouncing(&mut self, bouncing: bool) {
        self.stats.bouncing = bouncing;
    }

    fn boosted(&self, value: u32, amount: u32) -> u32 {
        value.saturating_add(amount).min(self.settings.max_stat)
    }
}
