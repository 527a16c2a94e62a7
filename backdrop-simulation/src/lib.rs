//! The backdrop simulation: a particle field with proximity links, the snake
//! easter egg, gesture bursts and overlay sparks, driven frame by frame.

pub mod driver;
pub mod emitter;
pub mod links;
pub mod monitor;
pub mod particle;
pub mod scene;
pub mod snake;
pub mod spark;
pub mod systems;

pub use driver::{render_scene, FrameDriver, FrameSummary};
pub use monitor::{AdaptivePolicy, Adjustment, FrameRateMonitor};
pub use particle::Particle;
pub use scene::{Scene, SceneSettings};
pub use snake::{Snake, SnakeSettings};
pub use spark::{Spark, SparkMotion};
