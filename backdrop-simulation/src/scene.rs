use backdrop_core::{Millis, RandomSource, Rect, SwipeDirection, Viewport};
use glam::Vec2;
use log::{debug, info};

use crate::emitter::{self, AmbientEmitter, PendingParticle};
use crate::monitor::{AdaptivePolicy, Adjustment, FrameRateMonitor};
use crate::particle::{self, Particle};
use crate::snake::{Snake, SnakeSettings};
use crate::spark::Spark;

/// Everything the scene needs to know up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub area_per_particle: f32,
    pub max_count: usize,
    pub attraction_radius: f32,
    pub link_distance: f32,
    pub adaptive: AdaptivePolicy,
    pub snake: SnakeSettings,
    /// Disables the particle field, the snake and bursts.
    pub reduced_motion: bool,
    /// Bounds of the support section, home of the ambient motes.
    pub support_region: Option<Rect>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            area_per_particle: 15_000.0,
            max_count: 150,
            attraction_radius: 100.0,
            link_distance: 120.0,
            adaptive: AdaptivePolicy::default(),
            snake: SnakeSettings::default(),
            reduced_motion: false,
            support_region: None,
        }
    }
}

/// The simulation context threaded through every system and emitter.
///
/// Owns all entities outright; nothing else keeps references into it.
pub struct Scene {
    pub settings: SceneSettings,
    pub viewport: Viewport,
    /// Most recent pointer position, if the pointer has moved yet.
    pub pointer: Option<Vec2>,
    pub particles: Vec<Particle>,
    /// Burst particles scheduled to join the field later.
    pub pending: Vec<PendingParticle>,
    pub sparks: Vec<Spark>,
    pub snake: Snake,
    pub ambient: AmbientEmitter,
    pub monitor: FrameRateMonitor,
    pub rng: Box<dyn RandomSource>,
}

impl Scene {
    pub fn new(settings: SceneSettings, viewport: Viewport, rng: Box<dyn RandomSource>) -> Self {
        let snake = if settings.reduced_motion {
            Snake::disabled(settings.snake.clone())
        } else {
            Snake::new(settings.snake.clone())
        };
        let mut scene = Self {
            ambient: AmbientEmitter::new(settings.support_region),
            monitor: FrameRateMonitor::new(settings.adaptive.sample_ms),
            settings,
            viewport,
            pointer: None,
            particles: Vec::new(),
            pending: Vec::new(),
            sparks: Vec::new(),
            snake,
            rng,
        };
        scene.reinitialize();
        scene
    }

    /// Field size earned by the current viewport.
    pub fn target_count(&self) -> usize {
        if self.settings.reduced_motion {
            return 0;
        }
        particle::target_count(self.viewport, self.settings.area_per_particle, self.settings.max_count)
    }

    /// Replaces the whole particle collection with a fresh random fill.
    pub fn reinitialize(&mut self) {
        let count = self.target_count();
        let viewport = self.viewport;
        let rng = self.rng.as_mut();
        self.particles = (0..count).map(|_| Particle::spawn(rng, viewport)).collect();
        debug!("Filled backdrop with {} particles", count);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        info!("Viewport resized to {}x{}", width, height);
        self.reinitialize();
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    /// Logo burst around the pointer (or the viewport centre if it never moved).
    pub fn emit_logo_burst(&mut self, now: Millis) {
        if self.settings.reduced_motion {
            return;
        }
        let origin = self.pointer.unwrap_or_else(|| self.viewport.center());
        let burst = emitter::logo_burst(origin, now, self.rng.as_mut());
        self.pending.extend(burst);
    }

    pub fn emit_swipe_burst(&mut self, direction: SwipeDirection, now: Millis) {
        if self.settings.reduced_motion {
            return;
        }
        let burst = emitter::swipe_burst(direction, self.viewport, now, self.rng.as_mut());
        self.particles.extend(burst);
    }

    pub fn emit_button_sparks(&mut self, bounds: Rect, now: Millis) {
        let sparks = emitter::button_sparks(bounds, now, self.rng.as_mut());
        self.sparks.extend(sparks);
    }

    pub fn emit_celebration(&mut self, center: Vec2, now: Millis) {
        let sparks = emitter::celebration_sparks(center, now, self.rng.as_mut());
        self.sparks.extend(sparks);
    }

    /// Moves due pending particles into the field and drops expired entities.
    pub fn purge_and_release(&mut self, now: Millis) {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|pending| pending.release_at <= now);
        self.pending = waiting;
        self.particles.extend(due.into_iter().map(|pending| pending.particle));

        self.particles.retain(|p| !p.is_expired(now));
        self.sparks.retain(|s| !s.is_finished(now));
    }

    /// Feeds one frame into the fps monitor and applies the resulting
    /// adjustment, if any.
    pub fn apply_frame_rate(&mut self, now: Millis) -> Option<Adjustment> {
        let fps = self.monitor.record_frame(now)?;
        debug!("Measured {} fps with {} particles", fps, self.particles.len());

        let adjustment = self.settings.adaptive.decide(fps, self.particles.len(), self.target_count());
        match adjustment {
            Adjustment::Shrink { to } => {
                info!("Frame rate {} fps: shrinking field {} -> {}", fps, self.particles.len(), to);
                self.particles.truncate(to);
            }
            Adjustment::Refill { to } => {
                debug!("Frame rate {} fps: refilling field to {}", fps, to);
                self.reinitialize();
            }
            Adjustment::Hold => {}
        }
        Some(adjustment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::SequenceSource;

    fn scene(viewport: Viewport) -> Scene {
        Scene::new(SceneSettings::default(), viewport, Box::new(SequenceSource::new(vec![0.1, 0.7, 0.4, 0.9])))
    }

    #[test]
    fn starts_with_area_based_fill() {
        let scene = scene(Viewport::new(1280.0, 720.0));
        assert_eq!(scene.particles.len(), 61);
    }

    #[test]
    fn resize_replaces_the_collection() {
        let mut scene = scene(Viewport::new(1280.0, 720.0));
        scene.emit_swipe_burst(SwipeDirection::Up, 0.0);
        assert_eq!(scene.particles.len(), 69);

        scene.resize(1920.0, 1080.0);
        assert_eq!(scene.particles.len(), 138);
        assert!(scene.particles.iter().all(|p| p.expires_at.is_none()));
    }

    #[test]
    fn pending_particles_join_when_due_and_leave_when_expired() {
        let mut scene = scene(Viewport::new(300.0, 300.0));
        let base = scene.particles.len();
        scene.pointer_moved(150.0, 150.0);
        scene.emit_logo_burst(0.0);
        assert_eq!(scene.pending.len(), 20);

        scene.purge_and_release(0.0);
        assert_eq!(scene.particles.len(), base + 1);

        scene.purge_and_release(950.0);
        assert_eq!(scene.particles.len(), base + 20);
        assert!(scene.pending.is_empty());

        scene.purge_and_release(3000.0);
        assert_eq!(scene.particles.len(), base + 19);

        scene.purge_and_release(3950.0);
        assert_eq!(scene.particles.len(), base);
    }

    #[test]
    fn slow_frames_shrink_the_field() {
        let mut scene = scene(Viewport::new(1500.0, 1000.0));
        assert_eq!(scene.particles.len(), 100);

        // 21 frames over 1050 ms -> 20 fps
        let mut adjustment = None;
        for frame in 0..=20 {
            adjustment = scene.apply_frame_rate(frame as f64 * 52.5).or(adjustment);
        }
        assert_eq!(adjustment, Some(Adjustment::Shrink { to: 80 }));
        assert_eq!(scene.particles.len(), 80);
    }

    #[test]
    fn fast_frames_refill_the_field() {
        let mut scene = scene(Viewport::new(1500.0, 1000.0));
        scene.particles.truncate(40);

        let mut adjustment = None;
        for frame in 0..=60 {
            adjustment = scene.apply_frame_rate(frame as f64 * 1000.0 / 60.0).or(adjustment);
        }
        assert_eq!(adjustment, Some(Adjustment::Refill { to: 100 }));
        assert_eq!(scene.particles.len(), 100);
    }

    #[test]
    fn reduced_motion_keeps_the_field_empty() {
        let settings = SceneSettings { reduced_motion: true, ..SceneSettings::default() };
        let mut scene = Scene::new(settings, Viewport::new(1280.0, 720.0), Box::new(SequenceSource::constant(0.5)));
        assert!(scene.particles.is_empty());

        scene.emit_logo_burst(0.0);
        scene.emit_swipe_burst(SwipeDirection::Down, 0.0);
        scene.purge_and_release(100.0);
        assert!(scene.particles.is_empty());

        scene.snake.reveal(0.0);
        assert!(!scene.snake.is_visible());
    }
}
