//! Splash sequence on the phone screen overlay.

use backdrop_core::{Millis, Rgba};
use log::debug;

/// Offsets from the trigger at which each splash appears, with its colour.
pub const SPLASHES: [(Millis, &str, Rgba); 3] = [
    (300.0, "NOKIA", Rgba::WHITE),
    (1000.0, "Connecting People", Rgba::CYAN),
    (1800.0, "SNAKE GAME", Rgba::YELLOW),
];
pub const RESTORE_AFTER_MS: Millis = 2500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayScreen {
    /// The overlay's regular content.
    Original,
    /// Black screen before the first splash.
    Blank,
    Splash { text: &'static str, color: Rgba },
}

#[derive(Debug, Default)]
pub struct BootOverlay {
    started_at: Option<Millis>,
}

impl BootOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the sequence unless the video is playing.
    /// Returns whether it started.
    pub fn trigger(&mut self, now: Millis, video_playing: bool) -> bool {
        if video_playing {
            return false;
        }
        debug!("Boot overlay started");
        self.started_at = Some(now);
        true
    }

    pub fn is_running(&self, now: Millis) -> bool {
        self.started_at.map_or(false, |start| now - start < RESTORE_AFTER_MS)
    }

    pub fn screen(&self, now: Millis) -> OverlayScreen {
        let Some(start) = self.started_at else {
            return OverlayScreen::Original;
        };
        let elapsed = now - start;
        if elapsed >= RESTORE_AFTER_MS {
            return OverlayScreen::Original;
        }
        SPLASHES
            .iter()
            .rev()
            .find(|(at, _, _)| elapsed >= *at)
            .map_or(OverlayScreen::Blank, |&(_, text, color)| OverlayScreen::Splash { text, color })
    }

    /// Forgets a finished sequence.
    pub fn tick(&mut self, now: Millis) {
        if self.started_at.is_some() && !self.is_running(now) {
            self.started_at = None;
        }
    }
}
