use backdrop_core::{FrameTime, Millis, Scheduler, Surface};

use crate::links;
use crate::scene::Scene;
use crate::systems::{AdaptiveSystem, LifecycleSystem, MotionSystem, SnakeSystem, SparkSystem};

/// What one driven frame contained, for logging and encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSummary {
    pub frame: u64,
    pub particles: usize,
    pub links: usize,
    pub sparks: usize,
    pub snake_visible: bool,
}

/// Drives simulation then rendering once per display refresh.
pub struct FrameDriver {
    scene: Scene,
    scheduler: Scheduler<Scene>,
    frame: u64,
}

impl FrameDriver {
    pub fn new(scene: Scene) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler
            .add_system(LifecycleSystem)
            .add_system(MotionSystem)
            .add_system(SnakeSystem)
            .add_system(SparkSystem)
            .add_system(AdaptiveSystem);
        Self { scene, scheduler, frame: 0 }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frames_driven(&self) -> u64 {
        self.frame
    }

    /// Advances every entity, then redraws the whole surface.
    pub fn step(&mut self, now: Millis, surface: &mut dyn Surface) -> FrameSummary {
        let time = FrameTime::new(now, self.frame);
        self.scheduler.execute_once(&mut self.scene, time);
        let links = render_scene(&self.scene, surface, now);

        let summary = FrameSummary {
            frame: self.frame,
            particles: self.scene.particles.len(),
            links,
            sparks: self.scene.sparks.iter().filter(|s| s.is_born(now)).count(),
            snake_visible: self.scene.snake.is_visible(),
        };
        self.frame += 1;
        summary
    }
}

/// Draws the scene back to front; returns how many links were drawn.
pub fn render_scene(scene: &Scene, surface: &mut dyn Surface, now: Millis) -> usize {
    let width = scene.viewport.width.round().max(1.0) as u32;
    let height = scene.viewport.height.round().max(1.0) as u32;
    if surface.width() != width || surface.height() != height {
        surface.resize(width, height);
    } else {
        surface.clear();
    }

    for particle in &scene.particles {
        particle.draw(surface);
    }

    let linked = links::draw_links(&scene.particles, scene.settings.link_distance, surface);

    scene.snake.draw(surface);

    for spark in &scene.sparks {
        spark.draw(surface, now);
    }
    linked
}
