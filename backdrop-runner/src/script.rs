//! Timed input scripts and their replay thread.

use backdrop_core::{InputEvent, Millis};
use crossbeam_channel::{unbounded, Receiver};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to read input script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse input script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Script entry {index} at {at_ms} ms is earlier than the entry before it")]
    OutOfOrder { index: usize, at_ms: Millis },

    #[error("Script entry {index} has a negative time")]
    NegativeTime { index: usize },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScriptEntry {
    pub at_ms: Millis,
    pub event: InputEvent,
}

pub fn parse_script(content: &str) -> Result<Vec<ScriptEntry>, ScriptError> {
    let entries: Vec<ScriptEntry> = serde_json::from_str(content)?;
    let mut previous = 0.0;
    for (index, entry) in entries.iter().enumerate() {
        if entry.at_ms < 0.0 {
            return Err(ScriptError::NegativeTime { index });
        }
        if entry.at_ms < previous {
            return Err(ScriptError::OutOfOrder { index, at_ms: entry.at_ms });
        }
        previous = entry.at_ms;
    }
    Ok(entries)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptEntry>, ScriptError> {
    let content = fs::read_to_string(path)?;
    let entries = parse_script(&content)?;
    info!("Loaded {} scripted events from {}", entries.len(), path.display());
    Ok(entries)
}

/// Hands out script events as simulated time passes.
#[derive(Debug, Clone)]
pub struct ScriptCursor {
    entries: Vec<ScriptEntry>,
    next: usize,
}

impl ScriptCursor {
    pub fn new(entries: Vec<ScriptEntry>) -> Self {
        Self { entries, next: 0 }
    }

    /// Every event due at or before `now` not handed out yet.
    pub fn due(&mut self, now: Millis) -> Vec<InputEvent> {
        let start = self.next;
        while self.entries.get(self.next).map_or(false, |entry| entry.at_ms <= now) {
            self.next += 1;
        }
        self.entries[start..self.next].iter().map(|entry| entry.event.clone()).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.entries.len()
    }

    /// Time of the next pending event.
    pub fn next_at(&self) -> Option<Millis> {
        self.entries.get(self.next).map(|entry| entry.at_ms)
    }
}

/// Replays a script against the wall clock on its own thread. The channel
/// closes when the script ends or `running` is cleared.
pub fn spawn_replay(
    entries: Vec<ScriptEntry>,
    start: Instant,
    running: Arc<AtomicBool>,
) -> (Receiver<InputEvent>, JoinHandle<()>) {
    let (tx, rx) = unbounded();
    let handle = thread::spawn(move || {
        let mut cursor = ScriptCursor::new(entries);
        while running.load(Ordering::SeqCst) {
            let Some(next_at) = cursor.next_at() else {
                break;
            };
            let elapsed = start.elapsed().as_secs_f64() * 1000.0;
            if next_at > elapsed {
                // Short naps keep Ctrl+C responsive during long gaps.
                let wait = (next_at - elapsed).min(50.0);
                spin_sleep::sleep(Duration::from_secs_f64(wait / 1000.0));
                continue;
            }
            for event in cursor.due(elapsed) {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        debug!("Input script replay finished");
    });
    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::KeyChord;

    const SCRIPT: &str = r#"[
        { "at_ms": 0, "event": { "type": "pointer_moved", "x": 10.0, "y": 20.0 } },
        { "at_ms": 100, "event": { "type": "key", "chord": "ctrl+s" } },
        { "at_ms": 100, "event": { "type": "power_pressed" } },
        { "at_ms": 250.5, "event": { "type": "scrolled", "y": 300.0 } }
    ]"#;

    #[test]
    fn parses_tagged_events() {
        let entries = parse_script(SCRIPT).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].event, InputEvent::Key { chord: KeyChord::CtrlS });
        assert_eq!(entries[3].at_ms, 250.5);
    }

    #[test]
    fn rejects_out_of_order_entries() {
        let script = r#"[
            { "at_ms": 200, "event": { "type": "hero_hover" } },
            { "at_ms": 100, "event": { "type": "brand_hover" } }
        ]"#;
        assert!(matches!(parse_script(script), Err(ScriptError::OutOfOrder { index: 1, .. })));
    }

    #[test]
    fn rejects_unknown_event_types() {
        let script = r#"[{ "at_ms": 0, "event": { "type": "teleport" } }]"#;
        assert!(matches!(parse_script(script), Err(ScriptError::Json(_))));
    }

    #[test]
    fn cursor_hands_out_each_event_once() {
        let mut cursor = ScriptCursor::new(parse_script(SCRIPT).unwrap());
        assert_eq!(cursor.due(0.0).len(), 1);
        assert!(cursor.due(50.0).is_empty());
        assert_eq!(cursor.due(100.0).len(), 2);
        assert_eq!(cursor.next_at(), Some(250.5));
        assert_eq!(cursor.due(1000.0), vec![InputEvent::Scrolled { y: 300.0 }]);
        assert!(cursor.is_finished());
    }

    #[test]
    fn replay_thread_delivers_everything() {
        let entries = parse_script(
            r#"[
                { "at_ms": 0, "event": { "type": "hero_hover" } },
                { "at_ms": 5, "event": { "type": "brand_hover" } }
            ]"#,
        )
        .unwrap();
        let (rx, handle) = spawn_replay(entries, Instant::now(), Arc::new(AtomicBool::new(true)));
        handle.join().unwrap();

        let events: Vec<InputEvent> = rx.try_iter().collect();
        assert_eq!(events, vec![InputEvent::HeroHover, InputEvent::BrandHover]);
    }

    #[test]
    fn missing_script_is_an_io_error() {
        let result = load_script(Path::new("/no/such/script.json"));
        assert!(matches!(result, Err(ScriptError::Io(_))));
    }
}
