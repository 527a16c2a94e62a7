use serde::Deserialize;

use crate::geometry::Rect;

/// Minimum vertical travel, in pixels, for a touch to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Keyboard shortcuts the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum KeyChord {
    /// Toggles the snake.
    #[serde(rename = "ctrl+s")]
    CtrlS,
    /// Plays the boot overlay.
    #[serde(rename = "ctrl+n")]
    CtrlN,
    /// Closes the mobile menu.
    #[serde(rename = "escape")]
    Escape,
    #[serde(other)]
    Other,
}

/// Something the host page reported since the previous frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    Resized { width: f32, height: f32 },
    /// Pointer entered the hero section.
    HeroHover,
    /// Pointer entered a brand mark (navbar or footer logo).
    BrandHover,
    ButtonHover { bounds: Rect },
    ButtonClick { bounds: Rect, x: f32, y: f32 },
    PhoneFrameClick,
    /// Pointer entered the phone frame.
    PhoneFrameHover,
    /// Pointer entered a content card, by layout order.
    CardHover { index: usize },
    PowerPressed,
    VideoTapped,
    VideoError,
    Key { chord: KeyChord },
    TouchStart { y: f32 },
    TouchEnd { y: f32 },
    Scrolled { y: f32 },
    HamburgerClicked,
    MenuLinkClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
}

impl SwipeDirection {
    /// Classifies a touch gesture by its start and end `y`.
    pub fn from_touch(start_y: f32, end_y: f32) -> Option<Self> {
        let diff = start_y - end_y;
        if diff.abs() <= SWIPE_THRESHOLD {
            None
        } else if diff > 0.0 {
            Some(SwipeDirection::Up)
        } else {
            Some(SwipeDirection::Down)
        }
    }
}
