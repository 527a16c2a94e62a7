use std::f32::consts::TAU;

use backdrop_core::{Millis, Rgba, Surface};
use glam::Vec2;

/// Travel budget of a stepped spark, measured as `|x + y|` of its offset.
const STEPPED_RANGE: f32 = 200.0;
/// Per-frame fraction of velocity a stepped spark moves by.
const STEPPED_RATE: f32 = 0.02;

/// How a spark moves over its life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SparkMotion {
    /// Eases out to `velocity` over its lifetime while shrinking and fading.
    Burst,
    /// Moves `velocity * 0.02` every frame, fading with distance travelled.
    Stepped,
    /// Rises by `rise` pixels over its lifetime, turning once, fading linearly.
    Drift { rise: f32 },
}

/// A short-lived overlay effect; never part of the particle field.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub origin: Vec2,
    pub velocity: Vec2,
    pub color: Rgba,
    pub size: f32,
    pub born: Millis,
    pub lifetime: Millis,
    pub motion: SparkMotion,
    pub offset: Vec2,
    pub opacity: f32,
    pub scale: f32,
    /// Rotation in radians.
    pub rotation: f32,
    done: bool,
}

impl Spark {
    pub fn new(
        origin: Vec2,
        velocity: Vec2,
        color: Rgba,
        size: f32,
        born: Millis,
        lifetime: Millis,
        motion: SparkMotion,
    ) -> Self {
        Self {
            origin,
            velocity,
            color,
            size,
            born,
            lifetime,
            motion,
            offset: Vec2::ZERO,
            opacity: 1.0,
            scale: 1.0,
            rotation: 0.0,
            done: false,
        }
    }

    /// Sparks can be scheduled ahead of time; they are inert until born.
    pub fn is_born(&self, now: Millis) -> bool {
        now >= self.born
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        self.done || now >= self.born + self.lifetime
    }

    pub fn position(&self) -> Vec2 {
        self.origin + self.offset
    }

    /// Advances to `now`; one call per frame.
    pub fn advance(&mut self, now: Millis) {
        if !self.is_born(now) || self.done {
            return;
        }
        let progress = (((now - self.born) / self.lifetime) as f32).clamp(0.0, 1.0);

        match self.motion {
            SparkMotion::Burst => {
                let eased = 1.0 - (1.0 - progress) * (1.0 - progress);
                self.offset = self.velocity * eased;
                self.scale = 1.0 - progress;
                self.opacity = 1.0 - progress;
            }
            SparkMotion::Stepped => {
                self.offset += self.velocity * STEPPED_RATE;
                let travelled = (self.offset.x + self.offset.y).abs();
                if travelled >= STEPPED_RANGE {
                    self.done = true;
                }
                let fade = (1.0 - travelled / STEPPED_RANGE).max(0.0);
                self.scale = fade;
                self.opacity = fade;
            }
            SparkMotion::Drift { rise } => {
                self.offset = Vec2::new(0.0, -rise * progress);
                self.rotation = TAU * progress;
                self.opacity = 1.0 - progress;
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, now: Millis) {
        if !self.is_born(now) || self.opacity <= 0.0 || self.scale <= 0.0 {
            return;
        }
        surface.fill_circle(self.position(), self.size * self.scale / 2.0, self.color, self.opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_reaches_full_offset_and_fades_out() {
        let mut spark = Spark::new(Vec2::ZERO, Vec2::new(50.0, 0.0), Rgba::CYAN, 4.0, 0.0, 1000.0, SparkMotion::Burst);
        spark.advance(500.0);
        assert!((spark.offset.x - 37.5).abs() < 1e-4);
        assert!((spark.opacity - 0.5).abs() < 1e-6);

        spark.advance(1000.0);
        assert_eq!(spark.offset, Vec2::new(50.0, 0.0));
        assert_eq!(spark.opacity, 0.0);
        assert!(spark.is_finished(1000.0));
    }

    #[test]
    fn unborn_spark_is_inert() {
        let mut spark = Spark::new(Vec2::ZERO, Vec2::new(10.0, 0.0), Rgba::CYAN, 4.0, 100.0, 1000.0, SparkMotion::Stepped);
        spark.advance(50.0);
        assert_eq!(spark.offset, Vec2::ZERO);
        assert!(!spark.is_finished(50.0));
    }

    #[test]
    fn stepped_finishes_after_travel_budget() {
        // 100 px/s along x: 2 px per frame, 100 frames to travel 200.
        let mut spark = Spark::new(Vec2::ZERO, Vec2::new(100.0, 0.0), Rgba::RED, 8.0, 0.0, 4000.0, SparkMotion::Stepped);
        for frame in 0..99 {
            spark.advance(frame as f64);
            assert!(!spark.is_finished(frame as f64));
        }
        spark.advance(99.0);
        assert!(spark.is_finished(99.0));
        assert!(spark.opacity.abs() < 1e-3);
    }

    #[test]
    fn stepped_spark_is_capped_by_lifetime() {
        // Moving along the anti-diagonal never increases |x + y|.
        let mut spark = Spark::new(Vec2::ZERO, Vec2::new(-100.0, 100.0), Rgba::RED, 8.0, 0.0, 4000.0, SparkMotion::Stepped);
        spark.advance(3999.0);
        assert!(!spark.is_finished(3999.0));
        assert!(spark.is_finished(4000.0));
    }

    #[test]
    fn drift_rises_and_turns_once() {
        let mut spark = Spark::new(Vec2::new(10.0, 500.0), Vec2::ZERO, Rgba::YELLOW, 6.0, 0.0, 4000.0, SparkMotion::Drift { rise: 800.0 });
        spark.advance(2000.0);
        assert_eq!(spark.position(), Vec2::new(10.0, 100.0));
        assert!((spark.rotation - std::f32::consts::PI).abs() < 1e-5);
        spark.advance(4000.0);
        assert_eq!(spark.opacity, 0.0);
    }
}
