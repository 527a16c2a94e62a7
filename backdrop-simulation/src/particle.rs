use backdrop_core::{Millis, RandomSource, Rgba, Surface, Viewport};
use glam::Vec2;

pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 6.0;
/// Amplitude of the sinusoidal opacity pulse around the baseline.
pub const PULSE_AMPLITUDE: f32 = 0.2;

const ATTRACTION_STRENGTH: f32 = 0.0001;
const GROWTH_RATE: f32 = 0.1;
const RADIUS_DECAY: f32 = 0.99;
const DAMPING: f32 = 0.99;

/// One dot of the background field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub base_opacity: f32,
    /// Pulse phase in radians; grows without bound.
    pub phase: f32,
    pub phase_rate: f32,
    /// Hue in degrees.
    pub hue: f32,
    /// Burst particles are purged once this time has passed.
    pub expires_at: Option<Millis>,
}

impl Particle {
    /// Random particle anywhere in the viewport.
    pub fn spawn(rng: &mut dyn RandomSource, viewport: Viewport) -> Self {
        let x = rng.next_f32() * viewport.width;
        let y = rng.next_f32() * viewport.height;
        Self::spawn_at(rng, Vec2::new(x, y))
    }

    /// Random particle at a fixed position.
    pub fn spawn_at(rng: &mut dyn RandomSource, position: Vec2) -> Self {
        let velocity = Vec2::new((rng.next_f32() - 0.5) * 0.5, (rng.next_f32() - 0.5) * 0.5);
        let radius = rng.next_f32() * 3.0 + 1.0;
        let base_opacity = rng.next_f32() * 0.5 + 0.3;
        let hue = rng.next_f32() * 60.0 + 200.0; // blue-cyan band
        let phase_rate = rng.next_f32() * 0.02 + 0.01;

        Self {
            position,
            velocity,
            radius,
            opacity: base_opacity,
            base_opacity,
            phase: 0.0,
            phase_rate,
            hue,
            expires_at: None,
        }
    }

    pub fn expires_at(mut self, at: Millis) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn is_expired(&self, now: Millis) -> bool {
        self.expires_at.map_or(false, |at| now >= at)
    }

    /// Advances one tick.
    ///
    /// `pointer` is the last known pointer position; with no pointer yet the
    /// particle behaves as if the pointer were out of reach.
    pub fn update(&mut self, pointer: Option<Vec2>, viewport: Viewport, attraction_radius: f32) {
        self.position += self.velocity;

        self.phase += self.phase_rate;
        self.opacity = self.base_opacity + self.phase.sin() * PULSE_AMPLITUDE;

        let pull = pointer
            .map(|p| p - self.position)
            .filter(|delta| delta.length() < attraction_radius);

        match pull {
            Some(delta) => {
                let force = (attraction_radius - delta.length()) / attraction_radius;
                self.velocity += delta * force * ATTRACTION_STRENGTH;
                self.radius = (self.radius * (1.0 + force * GROWTH_RATE)).min(MAX_RADIUS);
            }
            None => {
                self.radius = (self.radius * RADIUS_DECAY).max(MIN_RADIUS);
            }
        }
        self.radius = self.radius.clamp(MIN_RADIUS, MAX_RADIUS);

        self.position = viewport.wrap(self.position);

        self.velocity *= DAMPING;
    }

    pub fn color(&self) -> Rgba {
        Rgba::from_hsl(self.hue, 0.7, 0.6)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_glow(self.position, self.radius, self.color(), self.opacity.clamp(0.0, 1.0));
    }
}

/// Number of background particles a viewport earns: one per
/// `area_per_particle` px², capped at `max_count`.
pub fn target_count(viewport: Viewport, area_per_particle: f32, max_count: usize) -> usize {
    let earned = (viewport.area() / area_per_particle).floor().max(0.0) as usize;
    earned.min(max_count)
}
