use backdrop_core::{Millis, RandomSource, Rect, Rgba, Surface, Viewport};
use glam::{IVec2, Vec2};
use log::debug;
use smallvec::{smallvec, SmallVec};

/// The four axis-aligned headings a turn can pick from.
pub const DIRECTIONS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

const HEAD_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 8.0;
const OUTLINE_WIDTH: f32 = 2.0;

/// Tuning for the snake easter egg.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeSettings {
    pub step: f32,
    pub turn_probability: f32,
    pub visible_ms: Millis,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self { step: 10.0, turn_probability: 0.1, visible_ms: 5000.0 }
    }
}

/// Fixed-length snake wandering over the backdrop.
///
/// Hidden by default. A brand-mark hover shows it for a while; the keyboard
/// chord toggles it. It never grows or shrinks.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: SmallVec<[Vec2; 4]>,
    direction: IVec2,
    visible: bool,
    hide_at: Option<Millis>,
    enabled: bool,
    settings: SnakeSettings,
}

impl Snake {
    pub fn new(settings: SnakeSettings) -> Self {
        Self {
            segments: smallvec![Vec2::new(50.0, 50.0), Vec2::new(40.0, 50.0), Vec2::new(30.0, 50.0)],
            direction: DIRECTIONS[0],
            visible: false,
            hide_at: None,
            enabled: true,
            settings,
        }
    }

    /// A disabled snake ignores every trigger (reduced-motion mode).
    pub fn disabled(settings: SnakeSettings) -> Self {
        Self { enabled: false, ..Self::new(settings) }
    }

    pub fn segments(&self) -> &[Vec2] {
        &self.segments
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0]
    }

    pub fn direction(&self) -> IVec2 {
        self.direction
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide_at(&self) -> Option<Millis> {
        self.hide_at
    }

    /// Shows the snake until `now + visible_ms`, replacing any pending
    /// hide deadline.
    pub fn reveal(&mut self, now: Millis) {
        if !self.enabled {
            return;
        }
        self.visible = true;
        self.hide_at = Some(now + self.settings.visible_ms);
    }

    /// Flips visibility. Turning it on this way has no deadline; turning it
    /// off cancels any pending one. Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.visible = !self.visible;
        self.hide_at = None;
        debug!("Snake mode: {}", if self.visible { "ON" } else { "OFF" });
        self.visible
    }

    /// Advances one tick: expire the deadline, then move if visible.
    pub fn tick(&mut self, now: Millis, viewport: Viewport, rng: &mut dyn RandomSource) {
        if let Some(at) = self.hide_at {
            if now >= at {
                self.visible = false;
                self.hide_at = None;
            }
        }
        if !self.visible || self.segments.is_empty() {
            return;
        }

        let head = self.head() + self.direction.as_vec2() * self.settings.step;

        // Takes effect from the next tick.
        if rng.chance(self.settings.turn_probability) {
            self.direction = DIRECTIONS[rng.index(DIRECTIONS.len())];
        }

        self.segments.insert(0, viewport.wrap(head));
        self.segments.pop();
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        for (index, segment) in self.segments.iter().enumerate() {
            let size = if index == 0 { HEAD_SIZE } else { BODY_SIZE };
            let square = Rect::centered(*segment, size);
            surface.fill_rect(square, Rgba::YELLOW, 1.0);
            surface.stroke_rect(square, OUTLINE_WIDTH, Rgba::BLUE, 1.0);
        }
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(SnakeSettings::default())
    }
}
