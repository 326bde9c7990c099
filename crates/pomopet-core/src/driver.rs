//! Wall-clock driver for the engine.
//!
//! Maps real elapsed time onto the engine's virtual clock at a fixed frame
//! rate and applies intents as they arrive. The engine is shut down on
//! every exit path, so no job outlives the loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::engine::{Engine, Intent, Snapshot};
use crate::events::Event;
use crate::storage::KvStore;

/// Resolution at which wall time is fed to the engine.
pub const FRAME: Duration = Duration::from_millis(100);

/// Run until the intent channel closes.
///
/// `on_frame` sees the initial snapshot, then the snapshot after every time
/// step and every intent, together with the events that step produced.
pub async fn drive<S, F>(engine: &mut Engine<S>, mut intents: mpsc::Receiver<Intent>, mut on_frame: F)
where
    S: KvStore,
    F: FnMut(&Snapshot, &[Event]),
{
    let mut frames = tokio::time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let origin = Instant::now();
    let mut fed_ms: u64 = 0;

    on_frame(&engine.snapshot(), &[]);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                let elapsed_ms = u64::try_from(origin.elapsed().as_millis()).unwrap_or(u64::MAX);
                let step = elapsed_ms.saturating_sub(fed_ms);
                fed_ms = elapsed_ms;
                let events = engine.advance(step);
                on_frame(&engine.snapshot(), &events);
            }
            intent = intents.recv() => match intent {
                Some(intent) => {
                    tracing::debug!(?intent, "applying intent");
                    let events = engine.apply(intent);
                    on_frame(&engine.snapshot(), &events);
                }
                None => break,
            },
        }
    }

    engine.shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::notify::SilentNotifier;
    use crate::storage::MemoryKv;

    #[tokio::test(start_paused = true)]
    async fn wall_time_drives_countdown_and_shutdown_follows_close() {
        let mut engine = Engine::new(
            EngineConfig::default(),
            Box::new(SilentNotifier),
            MemoryKv::new(),
        );
        let (tx, rx) = mpsc::channel(8);
        let mut frames = 0usize;

        let feeder = async move {
            tx.send(Intent::Start).await.unwrap();
            tokio::time::sleep(Duration::from_millis(5_050)).await;
            drop(tx);
        };
        tokio::join!(drive(&mut engine, rx, |_, _| frames += 1), feeder);

        assert!(frames > 0);
        assert_eq!(engine.session().remaining_secs, 1495);
        assert!(engine.is_shut_down());
        assert!(engine.scheduler().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn intents_reach_the_engine() {
        let mut engine = Engine::new(
            EngineConfig::default(),
            Box::new(SilentNotifier),
            MemoryKv::new(),
        );
        let (tx, rx) = mpsc::channel(8);
        let mut seen = Vec::new();

        let feeder = async move {
            tx.send(Intent::AddTask { text: "feed cat".into() }).await.unwrap();
            tx.send(Intent::Adjust { minutes: -100 }).await.unwrap();
        };
        tokio::join!(
            drive(&mut engine, rx, |_, events| seen.extend_from_slice(events)),
            feeder
        );

        assert_eq!(engine.tasks().len(), 1);
        assert_eq!(engine.session().remaining_secs, 60);
        assert!(seen.iter().any(|e| matches!(e, Event::TaskAdded { .. })));
    }
}
