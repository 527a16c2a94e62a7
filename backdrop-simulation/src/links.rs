//! Proximity links between particles ("network" lines).
//!
//! Every unordered pair closer than the link distance gets a translucent
//! line whose opacity fades linearly to zero at the link distance. The scan
//! is a plain O(n²) pass; the particle count is capped and adaptively reduced
//! to keep it cheap.

use backdrop_core::{Rgba, Surface};
use glam::Vec2;

use crate::particle::Particle;

/// Opacity of a link between two particles at distance zero.
pub const MAX_LINK_OPACITY: f32 = 0.3;
pub const LINK_WIDTH: f32 = 0.5;
pub const LINK_COLOR: Rgba = Rgba::CYAN;

/// A pair of particle indices `(a, b)` with `a < b`, and the line opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

/// Opacity for a pair `distance` apart, 0 at or beyond `max_distance`.
pub fn link_opacity(distance: f32, max_distance: f32) -> f32 {
    if distance >= max_distance {
        return 0.0;
    }
    (max_distance - distance) / max_distance * MAX_LINK_OPACITY
}

/// All linked pairs in collection order.
pub fn find_links(particles: &[Particle], max_distance: f32) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, first) in particles.iter().enumerate() {
        for (j, second) in particles.iter().enumerate().skip(i + 1) {
            let distance = first.position.distance(second.position);
            if distance < max_distance {
                links.push(Link { a: i, b: j, opacity: link_opacity(distance, max_distance) });
            }
        }
    }
    links
}

/// Strokes every link; returns how many were drawn.
pub fn draw_links(particles: &[Particle], max_distance: f32, surface: &mut dyn Surface) -> usize {
    let links = find_links(particles, max_distance);
    for link in &links {
        let from: Vec2 = particles[link.a].position;
        let to: Vec2 = particles[link.b].position;
        surface.stroke_line(from, to, LINK_WIDTH, LINK_COLOR, link.opacity);
    }
    links.len()
}
