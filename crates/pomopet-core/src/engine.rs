//! Engine facade.
//!
//! Owns the mode controller, pet stats, task store and the scheduler that
//! drives them. The rendering shell forwards [`Intent`]s, advances time,
//! and reads a [`Snapshot`]; it never touches the parts directly.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = Engine::new(config.engine_config(), notifier, db);
//! engine.apply(Intent::Start);
//! // Once per second:
//! engine.tick();
//! render(&engine.snapshot());
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::notify::Notifier;
use crate::pet::{PetSettings, PetStats, StatEngine};
use crate::scheduler::{Job, JobId, Scheduler};
use crate::storage::KvStore;
use crate::task::{Task, TaskId, TaskStore};
use crate::timer::{Mode, ModeController, Session, TimerSettings};

const CLOCK_PERIOD_MS: u64 = 1_000;

/// Everything the engine needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub timer: TimerSettings,
    pub pet: PetSettings,
    pub bounce_period_ms: u64,
    pub bounce_ms: u64,
    pub storage_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timer: TimerSettings::default(),
            pet: PetSettings::default(),
            bounce_period_ms: 2_000,
            bounce_ms: 200,
            storage_key: "retro-tasks".into(),
        }
    }
}

/// User actions forwarded by the rendering shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Start,
    Pause,
    /// Start when paused, pause when running.
    StartPause,
    Reset,
    Adjust { minutes: i64 },
    Play,
    AddTask { text: String },
    ToggleTask { id: TaskId },
    DeleteTask { id: TaskId },
}

/// What the shell renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub session: Session,
    pub pet: PetStats,
    pub tasks: Vec<Task>,
}

pub struct Engine<S> {
    config: EngineConfig,
    controller: ModeController,
    stats: StatEngine,
    tasks: TaskStore<S>,
    scheduler: Scheduler,
    notifier: Box<dyn Notifier>,
    clock_job: Option<JobId>,
    drain_job: Option<JobId>,
    shut_down: bool,
}

impl<S: KvStore> Engine<S> {
    /// Build the engine and load the persisted task list from `storage`.
    pub fn new(config: EngineConfig, notifier: Box<dyn Notifier>, storage: S) -> Self {
        let tasks = TaskStore::load(storage, config.storage_key.clone());
        let mut scheduler = Scheduler::new();
        if config.bounce_period_ms > 0 {
            scheduler.schedule_every(config.bounce_period_ms, Job::Bounce);
        }
        Self {
            controller: ModeController::new(config.timer),
            stats: StatEngine::new(config.pet),
            tasks,
            scheduler,
            notifier,
            clock_job: None,
            drain_job: None,
            shut_down: false,
            config,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> Session {
        self.controller.session()
    }

    pub fn pet(&self) -> &PetStats {
        self.stats.stats()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            session: self.controller.session(),
            pet: *self.stats.stats(),
            tasks: self.tasks.tasks().to_vec(),
        }
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Apply one user intent. Ignored after [`Engine::shutdown`].
    pub fn apply(&mut self, intent: Intent) -> Vec<Event> {
        if self.shut_down {
            return Vec::new();
        }
        match intent {
            Intent::Start => self.start().into_iter().collect(),
            Intent::Pause => self.pause().into_iter().collect(),
            Intent::StartPause => {
                if self.controller.is_running() {
                    self.pause().into_iter().collect()
                } else {
                    self.start().into_iter().collect()
                }
            }
            Intent::Reset => vec![self.reset()],
            Intent::Adjust { minutes } => vec![self.adjust(minutes)],
            Intent::Play => self.play().into_iter().collect(),
            Intent::AddTask { text } => self.tasks.add(&text).into_iter().collect(),
            Intent::ToggleTask { id } => {
                let events = self.tasks.toggle(id);
                for event in &events {
                    if let Event::TaskCompleted { .. } = event {
                        self.stats.on_task_completed();
                    }
                }
                events
            }
            Intent::DeleteTask { id } => self.tasks.remove(id).into_iter().collect(),
        }
    }

    fn start(&mut self) -> Option<Event> {
        if !self.controller.start() {
            return None;
        }
        self.clock_job = Some(
            self.scheduler
                .schedule_every(CLOCK_PERIOD_MS, Job::ClockTick),
        );
        if self.controller.mode() == Mode::Focus {
            let period_ms = self.config.pet.drain_interval_secs.saturating_mul(1_000);
            self.drain_job = Some(self.scheduler.schedule_every(period_ms, Job::EnergyDrain));
        }
        Some(Event::TimerStarted {
            mode: self.controller.mode(),
            remaining_secs: self.controller.remaining_secs(),
            at: Utc::now(),
        })
    }

    fn pause(&mut self) -> Option<Event> {
        if !self.controller.pause() {
            return None;
        }
        self.stop_countdown_jobs();
        Some(Event::TimerPaused {
            remaining_secs: self.controller.remaining_secs(),
            at: Utc::now(),
        })
    }

    fn reset(&mut self) -> Event {
        self.controller.reset();
        self.stop_countdown_jobs();
        Event::TimerReset { at: Utc::now() }
    }

    fn adjust(&mut self, minutes: i64) -> Event {
        let remaining_secs = self.controller.adjust(minutes);
        Event::TimerAdjusted {
            remaining_secs,
            at: Utc::now(),
        }
    }

    fn play(&mut self) -> Option<Event> {
        if !self.stats.play() {
            return None;
        }
        self.scheduler
            .schedule_once(self.config.pet.play_duration_ms, Job::PlayEnd);
        let stats = self.stats.stats();
        Some(Event::PetPlayed {
            energy: stats.energy,
            happiness: stats.happiness,
            at: Utc::now(),
        })
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance virtual time by one second.
    pub fn tick(&mut self) -> Vec<Event> {
        self.advance(CLOCK_PERIOD_MS)
    }

    /// Advance virtual time, running every job that comes due in order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Event> {
        let target = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut events = Vec::new();
        while let Some((_, job)) = self.scheduler.pop_due(target) {
            self.run_job(job, &mut events);
        }
        self.scheduler.settle(target);
        events
    }

    fn run_job(&mut self, job: Job, events: &mut Vec<Event>) {
        match job {
            Job::ClockTick => {
                if let Some(transition) = self.controller.tick(self.notifier.as_ref()) {
                    self.stop_countdown_jobs();
                    self.stats.on_transition(&transition);
                    events.push(Event::ModeChanged {
                        from: transition.from,
                        to: transition.to,
                        duration_secs: transition.duration_secs,
                        play_unlocked: transition.completed_focus(),
                        at: Utc::now(),
                    });
                }
            }
            Job::EnergyDrain => {
                if let Some(energy) = self.stats.on_focus_tick(&self.controller.session()) {
                    events.push(Event::EnergyDrained {
                        energy,
                        at: Utc::now(),
                    });
                }
            }
            Job::Bounce => {
                self.stats.set_bouncing(true);
                self.scheduler.schedule_once(self.config.bounce_ms, Job::BounceEnd);
            }
            Job::BounceEnd => self.stats.set_bouncing(false),
            Job::PlayEnd => {
                self.stats.end_play();
                events.push(Event::PlayEnded { at: Utc::now() });
            }
        }
    }

    fn stop_countdown_jobs(&mut self) {
        if let Some(id) = self.clock_job.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.drain_job.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Cancel every scheduled job. Later `advance`/`apply` calls change
    /// nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.scheduler.clear();
        self.clock_job = None;
        self.drain_job = None;
        self.shut_down = true;
        tracing::debug!("engine shut down");
    }
}
