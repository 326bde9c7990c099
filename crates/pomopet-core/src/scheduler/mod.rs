//! Virtual-time job scheduler.
//!
//! All periodic and delayed work in the engine goes through one
//! [`Scheduler`]. Time only moves when the owner says so, which keeps the
//! engine deterministic under test and makes teardown a single `clear()`.
//!
//! Due jobs are handed out one at a time in `(due, creation order)` order,
//! so a job fired earlier in a step can cancel one that would have fired
//! later in the same step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(u64);

/// Work items the engine knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Job {
    /// One countdown second.
    ClockTick,
    /// One drain interval of running focus time.
    EnergyDrain,
    /// Start of a sprite bounce.
    Bounce,
    /// End of a sprite bounce.
    BounceEnd,
    /// End of the cosmetic play animation.
    PlayEnd,
}

#[derive(Debug, Clone)]
struct Entry {
    id: JobId,
    job: Job,
    due_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds since creation.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run `job` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, delay_ms: u64, job: Job) -> JobId {
        self.insert(job, delay_ms, None)
    }

    /// Run `job` every `period_ms`, first at `now + period_ms`. A zero
    /// period is treated as one millisecond.
    pub fn schedule_every(&mut self, period_ms: u64, job: Job) -> JobId {
        let period_ms = period_ms.max(1);
        self.insert(job, period_ms, Some(period_ms))
    }

    /// Returns `true` if the job was still pending.
    pub fn cancel(&mut self, id: JobId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every pending job.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pop the earliest job due at or before `until_ms`, moving the clock
    /// to its due time. Periodic jobs are re-armed before being returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(JobId, Job)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id))
            .map(|(idx, _)| idx)?;

        let entry = &mut self.entries[idx];
        self.now_ms = self.now_ms.max(entry.due_ms);
        let fired = (entry.id, entry.job);
        match entry.period_ms {
            Some(period) => entry.due_ms = entry.due_ms.saturating_add(period),
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything. Call after draining
    /// `pop_due` for the same target.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn insert(&mut self, job: Job, delay_ms: u64, period_ms: Option<u64>) -> JobId {
        let id = JobId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            job,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
        });
        id
    }
}
