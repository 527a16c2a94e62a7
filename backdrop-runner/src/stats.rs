use hdrhistogram::Histogram;
use log::info;
use std::time::Duration;

/// Frame time distribution for a run, in microseconds.
pub struct FrameStats {
    histogram: Histogram<u64>,
    budget: Duration,
    overruns: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub frames: u64,
    pub p50_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
    pub overruns: u64,
}

impl FrameStats {
    pub fn new(budget: Duration) -> Result<Self, hdrhistogram::CreationError> {
        // 1 µs to 60 s at 3 significant figures
        let histogram = Histogram::new_with_bounds(1, 60_000_000, 3)?;
        Ok(Self { histogram, budget, overruns: 0 })
    }

    /// Records one frame; returns whether it overran the budget.
    pub fn record(&mut self, elapsed: Duration) -> bool {
        let micros = (elapsed.as_micros() as u64).max(1);
        self.histogram.saturating_record(micros);
        let overran = elapsed > self.budget;
        if overran {
            self.overruns += 1;
        }
        overran
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            frames: self.histogram.len(),
            p50_us: self.histogram.value_at_quantile(0.5),
            p99_us: self.histogram.value_at_quantile(0.99),
            max_us: self.histogram.max(),
            overruns: self.overruns,
        }
    }

    pub fn log_summary(&self) {
        let summary = self.summary();
        info!(
            "Frames: {} | p50 {} µs | p99 {} µs | max {} µs | over budget: {}",
            summary.frames, summary.p50_us, summary.p99_us, summary.max_us, summary.overruns
        );
    }
}
