//! TOML-based application configuration.
//!
//! Stores:
//! - Focus/break durations and the adjust floor
//! - Pet stat tuning (bounds, rewards, drain period)
//! - Animation timing
//! - Notification sound
//! - Task storage key
//!
//! Configuration is stored at `~/.config/pomopet/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::engine::EngineConfig;
use crate::error::{ConfigError, Result};
use crate::pet::PetSettings;
use crate::timer::{TimerSettings, MIN_ADJUST_FLOOR_SECS};

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_duration_secs")]
    pub focus_duration_secs: u64,
    #[serde(default = "default_break_duration_secs")]
    pub break_duration_secs: u64,
    #[serde(default = "default_adjust_floor_secs")]
    pub adjust_floor_secs: u64,
}

/// Pet stat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetConfig {
    #[serde(default = "default_max_stat")]
    pub max_stat: u32,
    #[serde(default = "default_initial_energy")]
    pub initial_energy: u32,
    #[serde(default = "default_initial_happiness")]
    pub initial_happiness: u32,
    #[serde(default = "default_drain_interval_secs")]
    pub drain_interval_secs: u64,
    #[serde(default = "default_reward")]
    pub task_reward: u32,
    #[serde(default = "default_reward")]
    pub play_reward: u32,
    #[serde(default = "default_play_duration_ms")]
    pub play_duration_ms: u64,
}

/// Sprite animation timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_bounce_period_ms")]
    pub bounce_period_ms: u64,
    #[serde(default = "default_bounce_ms")]
    pub bounce_ms: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sound played on every mode change. Relative paths resolve against
    /// the data directory.
    #[serde(default = "default_sound")]
    pub sound: String,
}

/// Task list configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Key the task list is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomopet/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub pet: PetConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
}

// Default functions
fn default_focus_duration_secs() -> u64 {
    25 * 60
}
fn default_break_duration_secs() -> u64 {
    5 * 60
}
fn default_adjust_floor_secs() -> u64 {
    60
}
fn default_max_stat() -> u32 {
    100
}
fn default_initial_energy() -> u32 {
    50
}
fn default_initial_happiness() -> u32 {
    30
}
fn default_drain_interval_secs() -> u64 {
    60
}
fn default_reward() -> u32 {
    20
}
fn default_play_duration_ms() -> u64 {
    2_000
}
fn default_bounce_period_ms() -> u64 {
    2_000
}
fn default_bounce_ms() -> u64 {
    200
}
fn default_true() -> bool {
    true
}
fn default_sound() -> String {
    "assets/timer.mp3".into()
}
fn default_storage_key() -> String {
    "retro-tasks".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_duration_secs: default_focus_duration_secs(),
            break_duration_secs: default_break_duration_secs(),
            adjust_floor_secs: default_adjust_floor_secs(),
        }
    }
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            max_stat: default_max_stat(),
            initial_energy: default_initial_energy(),
            initial_happiness: default_initial_happiness(),
            drain_interval_secs: default_drain_interval_secs(),
            task_reward: default_reward(),
            play_reward: default_reward(),
            play_duration_ms: default_play_duration_ms(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            bounce_period_ms: default_bounce_period_ms(),
            bounce_ms: default_bounce_ms(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: default_sound(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

impl NotificationsConfig {
    pub fn sound_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.sound);
        if path.is_absolute() {
            return path;
        }
        data_dir().map(|dir| dir.join(&path)).unwrap_or(path)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|e| invalid(e.to_string()))?,
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid values, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save()?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a leaf value by dot-separated key. The change is validated but
    /// not saved; call [`Config::save`] to persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |key: &str, value: u64| {
            if value == 0 {
                Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be greater than zero".into(),
                })
            } else {
                Ok(())
            }
        };
        positive("timer.focus_duration_secs", self.timer.focus_duration_secs)?;
        positive("timer.break_duration_secs", self.timer.break_duration_secs)?;
        positive("pet.max_stat", self.pet.max_stat.into())?;
        positive("pet.drain_interval_secs", self.pet.drain_interval_secs)?;
        positive("animation.bounce_period_ms", self.animation.bounce_period_ms)?;
        if self.timer.adjust_floor_secs < MIN_ADJUST_FLOOR_SECS {
            return Err(ConfigError::InvalidValue {
                key: "timer.adjust_floor_secs".into(),
                message: format!("must be at least {MIN_ADJUST_FLOOR_SECS}"),
            });
        }
        if self.tasks.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "tasks.storage_key".into(),
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            timer: TimerSettings {
                focus_secs: self.timer.focus_duration_secs,
                break_secs: self.timer.break_duration_secs,
                adjust_floor_secs: self.timer.adjust_floor_secs,
            },
            pet: PetSettings {
                max_stat: self.pet.max_stat,
                initial_energy: self.pet.initial_energy,
                initial_happiness: self.pet.initial_happiness,
                drain_interval_secs: self.pet.drain_interval_secs,
                task_reward: self.pet.task_reward,
                play_reward: self.pet.play_reward,
                play_duration_ms: self.pet.play_duration_ms,
            },
            bounce_period_ms: self.animation.bounce_period_ms,
            bounce_ms: self.animation.bounce_ms,
            storage_key: self.tasks.storage_key.clone(),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.focus_duration_secs, 1500);
        assert_eq!(parsed.tasks.storage_key, "retro-tasks");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[timer]\nbreak_duration_secs = 600\n").unwrap();
        assert_eq!(parsed.timer.break_duration_secs, 600);
        assert_eq!(parsed.timer.focus_duration_secs, 1500);
        assert_eq!(parsed.pet.max_stat, 100);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.focus_duration_secs").as_deref(), Some("1500"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("tasks.storage_key").as_deref(), Some("retro-tasks"));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("timer").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("pet.drain_interval_secs", "300").unwrap();
        cfg.set("notifications.enabled", "false").unwrap();
        cfg.set("notifications.sound", "/tmp/ding.mp3").unwrap();
        assert_eq!(cfg.pet.drain_interval_secs, 300);
        assert!(!cfg.notifications.enabled);
        assert_eq!(cfg.notifications.sound, "/tmp/ding.mp3");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.set("timer.nonexistent_key", "1").is_err());
        assert!(cfg.set("timer", "1").is_err());
        assert!(cfg.set("", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("notifications.enabled", "not_a_bool").is_err());
        assert!(cfg.set("timer.focus_duration_secs", "-5").is_err());
    }

    #[test]
    fn set_rejects_zero_durations_and_keeps_old_value() {
        let mut cfg = Config::default();
        assert!(cfg.set("timer.focus_duration_secs", "0").is_err());
        assert_eq!(cfg.timer.focus_duration_secs, 1500);
    }

    #[test]
    fn set_rejects_adjust_floor_below_a_minute() {
        let mut cfg = Config::default();
        assert!(cfg.set("timer.adjust_floor_secs", "0").is_err());
        assert!(cfg.set("timer.adjust_floor_secs", "59").is_err());
        assert_eq!(cfg.timer.adjust_floor_secs, 60);

        cfg.set("timer.adjust_floor_secs", "120").unwrap();
        assert_eq!(cfg.engine_config().timer.adjust_floor_secs, 120);
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("timer.break_duration_secs", "420").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.break_duration_secs, 420);
    }

    #[test]
    fn load_from_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn engine_config_mirrors_values() {
        let mut cfg = Config::default();
        cfg.set("pet.task_reward", "5").unwrap();
        let engine = cfg.engine_config();
        assert_eq!(engine.timer.focus_secs, 1500);
        assert_eq!(engine.timer.break_secs, 300);
        assert_eq!(engine.pet.task_reward, 5);
        assert_eq!(engine.bounce_period_ms, 2_000);
        assert_eq!(engine.storage_key, "retro-tasks");
    }

    #[test]
    fn absolute_sound_path_is_kept() {
        let cfg = NotificationsConfig {
            enabled: true,
            sound: "/usr/share/sounds/ding.mp3".into(),
        };
        assert_eq!(cfg.sound_path(), PathBuf::from("/usr/share/sounds/ding.mp3"));
    }
}
