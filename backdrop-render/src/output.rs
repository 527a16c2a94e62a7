use backdrop_core::Millis;
use backdrop_simulation::FrameSummary;

use crate::encode::FrameEncoder;
use crate::raster::RasterSurface;
use crate::sink::FrameSink;
use crate::RenderError;

/// Encoder and sink pair that keeps every Nth frame.
pub struct FrameOutput {
    encoder: Box<dyn FrameEncoder>,
    sink: Box<dyn FrameSink>,
    every_n_frames: u64,
    written: u64,
}

impl FrameOutput {
    pub fn new(encoder: Box<dyn FrameEncoder>, sink: Box<dyn FrameSink>, every_n_frames: u32) -> Self {
        Self {
            encoder,
            sink,
            every_n_frames: u64::from(every_n_frames.max(1)),
            written: 0,
        }
    }

    /// Encodes and sends the frame if it falls on the output stride.
    /// Returns whether anything was written.
    pub fn submit(&mut self, summary: &FrameSummary, now: Millis, raster: &RasterSurface) -> Result<bool, RenderError> {
        if summary.frame % self.every_n_frames != 0 {
            return Ok(false);
        }
        let data = self.encoder.encode(summary, now, raster)?;
        self.sink.send(summary.frame, self.encoder.extension(), &data)?;
        self.written += 1;
        Ok(true)
    }

    pub fn frames_written(&self) -> u64 {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectorySink, JsonEncoder, NullSink};

    #[test]
    fn keeps_every_nth_frame() {
        let raster = RasterSurface::new(4, 4).unwrap();
        let mut output = FrameOutput::new(Box::new(JsonEncoder), Box::new(NullSink::default()), 3);

        let kept: Vec<bool> = (0..7)
            .map(|frame| {
                let summary = FrameSummary { frame, ..FrameSummary::default() };
                output.submit(&summary, frame as f64 * 16.0, &raster).unwrap()
            })
            .collect();

        assert_eq!(kept, vec![true, false, false, true, false, false, true]);
        assert_eq!(output.frames_written(), 3);
    }

    #[test]
    fn writes_through_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let raster = RasterSurface::new(3, 2).unwrap();
        let sink = DirectorySink::new(dir.path()).unwrap();
        let mut output = FrameOutput::new(Box::new(crate::ImageFrameEncoder::ppm()), Box::new(sink), 1);

        output.submit(&FrameSummary::default(), 0.0, &raster).unwrap();

        let bytes = std::fs::read(dir.path().join("frame_000000.ppm")).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
    }
}
