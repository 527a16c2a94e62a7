//! Toast notices.
//!
//! Only one notice exists at a time; showing a new one replaces whatever is
//! on screen. A notice slides in shortly after it is shown, stays for a
//! fixed time, then slides out and is dropped.

use backdrop_core::{Millis, Rgba};
use log::info;
use serde::Serialize;

pub const SLIDE_IN_DELAY_MS: Millis = 10.0;
pub const VISIBLE_UNTIL_MS: Millis = 3000.0;
pub const SLIDE_OUT_MS: Millis = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Gradient start, gradient end and text colour.
    pub fn palette(self) -> (Rgba, Rgba, Rgba) {
        match self {
            NoticeLevel::Success => (Rgba::from_rgb8(0x00, 0xff, 0x88), Rgba::CYAN, Rgba::WHITE),
            NoticeLevel::Warning => (Rgba::YELLOW, Rgba::GOLD, Rgba::BLUE),
            NoticeLevel::Error => (Rgba::RED, Rgba::from_rgb8(0xff, 0x6b, 0x6b), Rgba::WHITE),
            NoticeLevel::Info => (Rgba::BLUE, Rgba::LIGHT_BLUE, Rgba::WHITE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    /// Created but still off screen.
    Entering,
    Visible,
    Leaving,
    Gone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub shown_at: Millis,
}

impl Notice {
    pub fn phase(&self, now: Millis) -> NoticePhase {
        let age = now - self.shown_at;
        if age < SLIDE_IN_DELAY_MS {
            NoticePhase::Entering
        } else if age < VISIBLE_UNTIL_MS {
            NoticePhase::Visible
        } else if age < VISIBLE_UNTIL_MS + SLIDE_OUT_MS {
            NoticePhase::Leaving
        } else {
            NoticePhase::Gone
        }
    }

    /// Horizontal offset as a fraction of the notice width; 0 is fully on
    /// screen, 1 fully off to the right.
    pub fn offset(&self, now: Millis) -> f32 {
        match self.phase(now) {
            NoticePhase::Visible => 0.0,
            NoticePhase::Leaving => ((now - self.shown_at - VISIBLE_UNTIL_MS) / SLIDE_OUT_MS) as f32,
            NoticePhase::Entering | NoticePhase::Gone => 1.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, level: NoticeLevel, now: Millis) {
        let message = message.into();
        info!("Notice ({:?}): {}", level, message);
        self.current = Some(Notice { message, level, shown_at: now });
    }

    /// The notice on screen at `now`, if any.
    pub fn current(&self, now: Millis) -> Option<&Notice> {
        self.current.as_ref().filter(|notice| notice.phase(now) != NoticePhase::Gone)
    }

    /// Drops the notice once it has slid out.
    pub fn tick(&mut self, now: Millis) {
        if self.current.as_ref().map_or(false, |notice| notice.phase(now) == NoticePhase::Gone) {
            self.current = None;
        }
    }
}
