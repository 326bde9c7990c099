//! Live widget loop.
//!
//! Reads one command per line from stdin, drives the engine in real time
//! and prints a status line whenever the rendered state changes.

use pomopet_core::storage::Database;
use pomopet_core::{drive, notify, Config, Engine, Event, Intent, Snapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::render;

const HELP: &str = "\
commands:
  start | pause | sp        start, pause, or toggle the timer
  reset                     back to a fresh focus interval
  up [N] | down [N]         add or remove N minutes (default 1)
  play                      play with the pet (after a focus interval)
  add <text>                add a task
  done <id>                 toggle a task
  rm <id>                   delete a task
  help | quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Help,
    Quit,
    Nothing,
}

/// Parse one input line. JSON intents (`{"intent":"start"}`) are accepted
/// as well as the short command words.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Nothing);
    }
    if line.starts_with('{') {
        return serde_json::from_str(line)
            .map(Command::Intent)
            .map_err(|e| format!("invalid intent: {e}"));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let minutes = |rest: &str| -> Result<i64, String> {
        if rest.is_empty() {
            Ok(1)
        } else {
            rest.parse().map_err(|_| format!("not a number: {rest}"))
        }
    };
    let id = |rest: &str| -> Result<i64, String> {
        rest.parse().map_err(|_| format!("not a task id: {rest:?}"))
    };

    let intent = match word {
        "start" => Intent::Start,
        "pause" => Intent::Pause,
        "sp" => Intent::StartPause,
        "reset" => Intent::Reset,
        "up" => Intent::Adjust {
            minutes: minutes(rest)?,
        },
        "down" => Intent::Adjust {
            minutes: minutes(rest)?.saturating_neg(),
        },
        "play" => Intent::Play,
        "add" => Intent::AddTask {
            text: rest.to_string(),
        },
        "done" => Intent::ToggleTask { id: id(rest)? },
        "rm" => Intent::DeleteTask { id: id(rest)? },
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };
    Ok(Command::Intent(intent))
}

async fn read_intents(tx: mpsc::Sender<Intent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Command::Intent(intent)) => {
                        if tx.send(intent).await.is_err() {
                            break;
                        }
                    }
                    Ok(Command::Help) => eprintln!("{HELP}"),
                    Ok(Command::Quit) => break,
                    Ok(Command::Nothing) => {}
                    Err(msg) => eprintln!("{msg}"),
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
}

fn touches_tasks(events: &[Event]) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            Event::TaskAdded { .. } | Event::TaskToggled { .. } | Event::TaskDeleted { .. }
        )
    })
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let max = config.pet.max_stat;
    let mut engine = Engine::new(
        config.engine_config(),
        notify::from_config(&config.notifications),
        db,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if !json {
        eprintln!("{HELP}");
    }

    runtime.block_on(async {
        let (tx, rx) = mpsc::channel(16);
        let reader = tokio::spawn(read_intents(tx));
        let mut last = String::new();

        drive(&mut engine, rx, |snapshot: &Snapshot, events: &[Event]| {
            let frame = if json {
                serde_json::to_string(snapshot).unwrap_or_default()
            } else {
                render::frame(snapshot, max)
            };
            if frame != last {
                println!("{frame}");
                last = frame;
            }
            if !json && touches_tasks(events) {
                for task in &snapshot.tasks {
                    println!("  {}", render::task_line(task));
                }
            }
        })
        .await;

        reader.abort();
    });

    // The stdin reader may still be parked in a blocking read.
    runtime.shutdown_background();
    Ok(())
}
