//! One-shot producers of transient effects tied to a gesture.
//!
//! Emitters only build entities; the scene owns them afterwards. Staggered
//! releases and self-removal are expressed through timestamps (`release_at`,
//! `expires_at`, `born`, `lifetime`) that the frame driver checks every tick.

use std::f32::consts::TAU;

use backdrop_core::{Millis, RandomSource, Rect, Rgba, SwipeDirection, Viewport};
use glam::Vec2;

use crate::particle::Particle;
use crate::spark::{Spark, SparkMotion};

pub const LOGO_BURST_COUNT: usize = 20;
pub const LOGO_BURST_STAGGER_MS: Millis = 50.0;
pub const LOGO_BURST_LIFETIME_MS: Millis = 3000.0;

pub const SWIPE_BURST_COUNT: usize = 8;
pub const SWIPE_BURST_LIFETIME_MS: Millis = 2000.0;
const SWIPE_EDGE_MARGIN: f32 = 50.0;
const SWIPE_SPEED: f32 = 2.0;

pub const BUTTON_SPARK_COUNT: usize = 5;
const BUTTON_SPARK_SPEED: f32 = 50.0;
const BUTTON_SPARK_LIFETIME_MS: Millis = 1000.0;
const BUTTON_SPARK_COLORS: [Rgba; 3] = [Rgba::YELLOW, Rgba::CYAN, Rgba::BLUE];

pub const CELEBRATION_SPARK_COUNT: usize = 15;
const CELEBRATION_STAGGER_MS: Millis = 50.0;
const CELEBRATION_LIFETIME_MS: Millis = 4000.0;
const CELEBRATION_COLORS: [Rgba; 4] = [Rgba::YELLOW, Rgba::CYAN, Rgba::BLUE, Rgba::RED];

pub const AMBIENT_INTERVAL_MS: Millis = 3000.0;
pub const AMBIENT_MOTE_COUNT: usize = 3;
const AMBIENT_STAGGER_MS: Millis = 800.0;
const AMBIENT_LIFETIME_MS: Millis = 4000.0;
const AMBIENT_RISE_FACTOR: f32 = 1.2;

/// A particle waiting to join the field.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingParticle {
    pub release_at: Millis,
    pub particle: Particle,
}

/// Logo burst: colourful particles around `origin`, released one every
/// 50 ms, each living three seconds from its release.
pub fn logo_burst(origin: Vec2, now: Millis, rng: &mut dyn RandomSource) -> Vec<PendingParticle> {
    (0..LOGO_BURST_COUNT)
        .map(|i| {
            let release_at = now + i as Millis * LOGO_BURST_STAGGER_MS;
            let jitter = Vec2::new(rng.range(-50.0, 50.0), rng.range(-50.0, 50.0));
            let mut particle = Particle::spawn_at(rng, origin + jitter);
            particle.hue = rng.next_f32() * 360.0;
            particle.radius = rng.next_f32() * 4.0 + 2.0;
            PendingParticle {
                release_at,
                particle: particle.expires_at(release_at + LOGO_BURST_LIFETIME_MS),
            }
        })
        .collect()
}

/// Swipe burst: particles along the edge the swipe started from, drifting
/// in the swipe direction.
pub fn swipe_burst(
    direction: SwipeDirection,
    viewport: Viewport,
    now: Millis,
    rng: &mut dyn RandomSource,
) -> Vec<Particle> {
    let (y, vy) = match direction {
        SwipeDirection::Up => (viewport.height - SWIPE_EDGE_MARGIN, -SWIPE_SPEED),
        SwipeDirection::Down => (SWIPE_EDGE_MARGIN, SWIPE_SPEED),
    };
    (0..SWIPE_BURST_COUNT)
        .map(|_| {
            let x = rng.next_f32() * viewport.width;
            let mut particle = Particle::spawn_at(rng, viewport.wrap(Vec2::new(x, y)));
            particle.velocity.y = vy;
            particle.hue = rng.next_f32() * 60.0 + 200.0;
            particle.expires_at(now + SWIPE_BURST_LIFETIME_MS)
        })
        .collect()
}

/// Button sparks: evenly spread around the button centre.
pub fn button_sparks(bounds: Rect, now: Millis, rng: &mut dyn RandomSource) -> Vec<Spark> {
    let center = bounds.center();
    (0..BUTTON_SPARK_COUNT)
        .map(|i| {
            let angle = TAU * i as f32 / BUTTON_SPARK_COUNT as f32;
            let velocity = Vec2::from_angle(angle) * BUTTON_SPARK_SPEED;
            let color = BUTTON_SPARK_COLORS[rng.index(BUTTON_SPARK_COLORS.len())];
            Spark::new(center, velocity, color, 4.0, now, BUTTON_SPARK_LIFETIME_MS, SparkMotion::Burst)
        })
        .collect()
}

/// Celebration sparks for the phone demo starting: a staggered ring.
pub fn celebration_sparks(center: Vec2, now: Millis, rng: &mut dyn RandomSource) -> Vec<Spark> {
    (0..CELEBRATION_SPARK_COUNT)
        .map(|i| {
            let angle = TAU * i as f32 / CELEBRATION_SPARK_COUNT as f32;
            let speed = 80.0 + rng.next_f32() * 40.0;
            let color = CELEBRATION_COLORS[rng.index(CELEBRATION_COLORS.len())];
            Spark::new(
                center,
                Vec2::from_angle(angle) * speed,
                color,
                8.0,
                now + i as Millis * CELEBRATION_STAGGER_MS,
                CELEBRATION_LIFETIME_MS,
                SparkMotion::Stepped,
            )
        })
        .collect()
}

/// Periodic motes floating up through the support section.
#[derive(Debug, Clone)]
pub struct AmbientEmitter {
    region: Option<Rect>,
    next_at: Option<Millis>,
}

impl AmbientEmitter {
    /// `region` is the support section's bounds; without it the emitter
    /// stays silent.
    pub fn new(region: Option<Rect>) -> Self {
        Self { region, next_at: None }
    }

    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    /// Emits a wave when the interval has elapsed. The first wave comes one
    /// interval after the first call.
    pub fn poll(&mut self, now: Millis, viewport: Viewport, rng: &mut dyn RandomSource) -> Vec<Spark> {
        let Some(region) = self.region else {
            return Vec::new();
        };
        let due = *self.next_at.get_or_insert(now + AMBIENT_INTERVAL_MS);
        if now < due {
            return Vec::new();
        }
        self.next_at = Some(due + AMBIENT_INTERVAL_MS);

        let rise = viewport.height * AMBIENT_RISE_FACTOR;
        (0..AMBIENT_MOTE_COUNT)
            .map(|i| {
                let x = region.x + rng.next_f32() * region.width;
                let origin = Vec2::new(x, region.y + region.height);
                Spark::new(
                    origin,
                    Vec2::ZERO,
                    Rgba::GOLD,
                    6.0,
                    now + i as Millis * AMBIENT_STAGGER_MS,
                    AMBIENT_LIFETIME_MS,
                    SparkMotion::Drift { rise },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::SequenceSource;

    #[test]
    fn logo_burst_is_staggered_and_expires() {
        let mut rng = SequenceSource::constant(0.5);
        let burst = logo_burst(Vec2::new(300.0, 200.0), 1000.0, &mut rng);

        assert_eq!(burst.len(), LOGO_BURST_COUNT);
        assert_eq!(burst[0].release_at, 1000.0);
        assert_eq!(burst[19].release_at, 1950.0);
        assert_eq!(burst[19].particle.expires_at, Some(4950.0));
        // zero jitter at 0.5, radius 0.5 * 4 + 2
        assert_eq!(burst[0].particle.position, Vec2::new(300.0, 200.0));
        assert_eq!(burst[0].particle.radius, 4.0);
        assert_eq!(burst[0].particle.hue, 180.0);
    }

    #[test]
    fn swipe_up_starts_near_the_bottom_and_rises() {
        let mut rng = SequenceSource::constant(0.25);
        let viewport = Viewport::new(400.0, 800.0);
        let burst = swipe_burst(SwipeDirection::Up, viewport, 0.0, &mut rng);

        assert_eq!(burst.len(), SWIPE_BURST_COUNT);
        for p in &burst {
            assert_eq!(p.position, Vec2::new(100.0, 750.0));
            assert_eq!(p.velocity.y, -2.0);
            assert_eq!(p.expires_at, Some(SWIPE_BURST_LIFETIME_MS));
        }

        let burst = swipe_burst(SwipeDirection::Down, viewport, 0.0, &mut rng);
        assert!(burst.iter().all(|p| p.position.y == 50.0 && p.velocity.y == 2.0));
    }

    #[test]
    fn button_sparks_ring_the_center() {
        let mut rng = SequenceSource::constant(0.0);
        let sparks = button_sparks(Rect::new(0.0, 0.0, 100.0, 40.0), 0.0, &mut rng);
        assert_eq!(sparks.len(), BUTTON_SPARK_COUNT);
        assert!(sparks.iter().all(|s| s.origin == Vec2::new(50.0, 20.0)));
        assert!((sparks[0].velocity - Vec2::new(50.0, 0.0)).length() < 1e-4);
        assert!(sparks.iter().all(|s| (s.velocity.length() - 50.0).abs() < 1e-3));
        assert_eq!(sparks[0].color, Rgba::YELLOW);
    }

    #[test]
    fn celebration_is_staggered() {
        let mut rng = SequenceSource::constant(0.5);
        let sparks = celebration_sparks(Vec2::ZERO, 100.0, &mut rng);
        assert_eq!(sparks.len(), CELEBRATION_SPARK_COUNT);
        assert_eq!(sparks[14].born, 100.0 + 14.0 * 50.0);
        assert!((sparks[0].velocity.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn ambient_emits_every_interval() {
        let mut emitter = AmbientEmitter::new(Some(Rect::new(0.0, 1000.0, 500.0, 400.0)));
        let mut rng = SequenceSource::constant(0.5);
        let viewport = Viewport::new(500.0, 800.0);

        assert!(emitter.poll(0.0, viewport, &mut rng).is_empty());
        assert!(emitter.poll(2999.0, viewport, &mut rng).is_empty());

        let wave = emitter.poll(3000.0, viewport, &mut rng);
        assert_eq!(wave.len(), AMBIENT_MOTE_COUNT);
        assert_eq!(wave[0].origin, Vec2::new(250.0, 1400.0));
        assert_eq!(wave[2].born, 3000.0 + 1600.0);
        match wave[0].motion {
            SparkMotion::Drift { rise } => assert!((rise - 960.0).abs() < 1e-3),
            other => panic!("unexpected motion {:?}", other),
        }

        assert!(emitter.poll(5999.0, viewport, &mut rng).is_empty());
        assert_eq!(emitter.poll(6000.0, viewport, &mut rng).len(), AMBIENT_MOTE_COUNT);
    }

    #[test]
    fn ambient_without_region_is_silent() {
        let mut emitter = AmbientEmitter::new(None);
        let mut rng = SequenceSource::constant(0.5);
        assert!(emitter.poll(1.0e6, Viewport::new(10.0, 10.0), &mut rng).is_empty());
    }
}
