//! The per-frame simulation pipeline, in the order the driver registers it.

use backdrop_core::{FrameTime, System};

use crate::scene::Scene;

/// Releases due burst particles and purges expired particles and sparks.
#[derive(Default)]
pub struct LifecycleSystem;

impl System<Scene> for LifecycleSystem {
    fn name(&self) -> &'static str {
        "lifecycle"
    }

    fn run(&mut self, scene: &mut Scene, time: FrameTime) {
        scene.purge_and_release(time.now);
    }
}

/// Advances every particle one tick.
#[derive(Default)]
pub struct MotionSystem;

impl System<Scene> for MotionSystem {
    fn name(&self) -> &'static str {
        "motion"
    }

    fn run(&mut self, scene: &mut Scene, _time: FrameTime) {
        let pointer = scene.pointer;
        let viewport = scene.viewport;
        let radius = scene.settings.attraction_radius;
        for particle in &mut scene.particles {
            particle.update(pointer, viewport, radius);
        }
    }
}

#[derive(Default)]
pub struct SnakeSystem;

impl System<Scene> for SnakeSystem {
    fn name(&self) -> &'static str {
        "snake"
    }

    fn run(&mut self, scene: &mut Scene, time: FrameTime) {
        let viewport = scene.viewport;
        scene.snake.tick(time.now, viewport, scene.rng.as_mut());
    }
}

/// Emits ambient motes and advances every spark.
#[derive(Default)]
pub struct SparkSystem;

impl System<Scene> for SparkSystem {
    fn name(&self) -> &'static str {
        "sparks"
    }

    fn run(&mut self, scene: &mut Scene, time: FrameTime) {
        let viewport = scene.viewport;
        let motes = scene.ambient.poll(time.now, viewport, scene.rng.as_mut());
        scene.sparks.extend(motes);
        for spark in &mut scene.sparks {
            spark.advance(time.now);
        }
    }
}

/// Frame-rate feedback on the particle count.
#[derive(Default)]
pub struct AdaptiveSystem;

impl System<Scene> for AdaptiveSystem {
    fn name(&self) -> &'static str {
        "adaptive"
    }

    fn run(&mut self, scene: &mut Scene, time: FrameTime) {
        scene.apply_frame_rate(time.now);
    }
}
