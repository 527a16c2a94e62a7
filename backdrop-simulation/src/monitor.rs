use backdrop_core::Millis;

/// Thresholds for the frame-rate feedback on the particle count.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptivePolicy {
    pub sample_ms: Millis,
    pub low_fps: u32,
    pub high_fps: u32,
    pub min_count_to_shrink: usize,
    pub max_count_to_refill: usize,
    pub shrink_factor: f32,
}

impl Default for AdaptivePolicy {
    fn default() -> Self {
        Self {
            sample_ms: 1000.0,
            low_fps: 30,
            high_fps: 50,
            min_count_to_shrink: 50,
            max_count_to_refill: 100,
            shrink_factor: 0.8,
        }
    }
}

/// What to do with the particle collection after an fps sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Hold,
    /// Keep the first `to` particles.
    Shrink { to: usize },
    /// Rebuild the collection at the viewport target size.
    Refill { to: usize },
}

impl AdaptivePolicy {
    /// Decision for a measured `fps` given the current particle `count` and
    /// the viewport-derived `target`.
    ///
    /// There is no hysteresis: a load hovering between the two thresholds can
    /// alternate shrink and refill.
    pub fn decide(&self, fps: u32, count: usize, target: usize) -> Adjustment {
        if fps < self.low_fps && count > self.min_count_to_shrink {
            let to = (count as f64 * self.shrink_factor as f64).floor() as usize;
            Adjustment::Shrink { to }
        } else if fps > self.high_fps && count < self.max_count_to_refill {
            Adjustment::Refill { to: target }
        } else {
            Adjustment::Hold
        }
    }
}

/// Counts frames and reports a rounded rate once per sample window.
#[derive(Debug, Clone)]
pub struct FrameRateMonitor {
    sample_ms: Millis,
    frames: u32,
    window_start: Option<Millis>,
    last_fps: Option<u32>,
}

impl FrameRateMonitor {
    pub fn new(sample_ms: Millis) -> Self {
        Self { sample_ms, frames: 0, window_start: None, last_fps: None }
    }

    /// Records one frame at `now`; returns the rate when a window closes.
    pub fn record_frame(&mut self, now: Millis) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now - start;
        if elapsed < self.sample_ms {
            return None;
        }
        let fps = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
        self.frames = 0;
        self.window_start = Some(now);
        self.last_fps = Some(fps);
        Some(fps)
    }

    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }
}
