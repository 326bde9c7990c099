//! Transition cue.
//!
//! Notifiers are fire-and-forget. Implementations must swallow their own
//! failures and return immediately; the tick pipeline never waits on them.

use std::path::{Path, PathBuf};

use crate::storage::NotificationsConfig;

pub trait Notifier: Send {
    fn notify_transition(&self);
}

/// Plays a bundled audio asset through the platform's default handler.
#[derive(Debug, Clone)]
pub struct SoundNotifier {
    path: PathBuf,
}

impl SoundNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Notifier for SoundNotifier {
    fn notify_transition(&self) {
        if !self.path.is_file() {
            tracing::debug!(path = %self.path.display(), "transition sound missing, skipping");
            return;
        }
        // Detached: the player runs on its own and we never read its status.
        if let Err(e) = open::that_detached(&self.path) {
            tracing::debug!(error = %e, "failed to play transition sound");
        }
    }
}

/// Does nothing. Used when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify_transition(&self) {}
}

/// Build the notifier described by the configuration.
pub fn from_config(config: &NotificationsConfig) -> Box<dyn Notifier> {
    if config.enabled {
        Box::new(SoundNotifier::new(config.sound_path()))
    } else {
        Box::new(SilentNotifier)
    }
}
