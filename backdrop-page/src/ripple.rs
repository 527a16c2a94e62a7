use backdrop_core::{Millis, Rect, Vec2};

pub const RIPPLE_MS: Millis = 600.0;
pub const RIPPLE_MAX_SCALE: f32 = 4.0;

/// Expanding circle left by a button click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Square bounds relative to the button's top-left corner.
    pub rect: Rect,
    pub created_at: Millis,
}

impl Ripple {
    /// Sized to the button's larger side and centred on the click.
    pub fn new(button: Rect, click: Vec2, now: Millis) -> Self {
        let size = button.width.max(button.height);
        let x = click.x - button.x - size / 2.0;
        let y = click.y - button.y - size / 2.0;
        Self { rect: Rect::new(x, y, size, size), created_at: now }
    }

    fn progress(&self, now: Millis) -> f32 {
        ((now - self.created_at) / RIPPLE_MS).clamp(0.0, 1.0) as f32
    }

    pub fn scale(&self, now: Millis) -> f32 {
        self.progress(now) * RIPPLE_MAX_SCALE
    }

    pub fn opacity(&self, now: Millis) -> f32 {
        1.0 - self.progress(now)
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        now - self.created_at >= RIPPLE_MS
    }
}
