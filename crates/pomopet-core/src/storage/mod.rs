mod config;
pub mod database;
pub mod kv;

pub use config::{
    AnimationConfig, Config, NotificationsConfig, PetConfig, TasksConfig, TimerConfig,
};
pub use database::Database;
pub use kv::{KvStore, MemoryKv};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/pomopet[-dev]/` based on POMOPET_ENV.
///
/// Set POMOPET_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOPET_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomopet-dev")
    } else {
        base_dir.join("pomopet")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
