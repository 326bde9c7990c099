//! Plain-text rendering of engine snapshots.

use pomopet_core::{PetStats, Session, Snapshot, Task};

const BAR_BLOCKS: u32 = 5;

/// `MM:SS`, minutes not capped at 99.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Five-block bar, one block per fifth of `max`.
pub fn stat_bar(value: u32, max: u32) -> String {
    (0..BAR_BLOCKS)
        .map(|i| {
            if u64::from(i) * u64::from(max) < u64::from(value) * u64::from(BAR_BLOCKS) {
                '■'
            } else {
                '□'
            }
        })
        .collect()
}

pub fn session_line(session: &Session) -> String {
    format!(
        "{:<12} {} {}",
        session.mode.label(),
        format_time(session.remaining_secs),
        if session.running { "▶" } else { "⏸" }
    )
}

pub fn pet_line(pet: &PetStats, max: u32) -> String {
    let sprite = match (pet.is_playing, pet.bouncing) {
        (true, _) => "\\🐱/",
        (false, true) => " 🐱^",
        (false, false) => " 🐱 ",
    };
    format!(
        "{sprite} ENERGY {} HAPPINESS {} {}",
        stat_bar(pet.energy, max),
        stat_bar(pet.happiness, max),
        if pet.can_play { "▶ PLAY" } else { "🔒 LOCKED" }
    )
}

/// One status line for the whole widget.
pub fn frame(snapshot: &Snapshot, max: u32) -> String {
    let done = snapshot.tasks.iter().filter(|t| t.done).count();
    format!(
        "{} | {} | tasks {done}/{}",
        session_line(&snapshot.session),
        pet_line(&snapshot.pet, max),
        snapshot.tasks.len()
    )
}

pub fn task_line(task: &Task) -> String {
    format!(
        "[{}] {}  {}",
        if task.done { "x" } else { " " },
        task.id,
        task.text
    )
}
