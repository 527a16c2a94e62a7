//! Shared vocabulary for the backdrop workspace.
//!
//! Everything here is independent of what is being simulated: viewport
//! geometry, colours, time stamps, the injectable random source, input
//! events, the drawing surface trait and the per-frame system pipeline.

pub mod color;
pub mod geometry;
pub mod input;
pub mod random;
pub mod scheduler;
pub mod surface;

pub use color::Rgba;
pub use geometry::{wrap, Rect, Viewport};
pub use glam::Vec2;
pub use input::{InputEvent, KeyChord, SwipeDirection};
pub use random::{RandomSource, RngSource, SequenceSource};
pub use scheduler::{Scheduler, System};
pub use surface::Surface;

/// Milliseconds on the host's monotonic clock.
pub type Millis = f64;

/// Timing information handed to every system for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Time at the start of the frame.
    pub now: Millis,
    /// Number of frames driven before this one.
    pub frame: u64,
}

impl FrameTime {
    pub fn new(now: Millis, frame: u64) -> Self {
        Self { now, frame }
    }
}
