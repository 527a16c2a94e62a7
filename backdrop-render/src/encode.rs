use backdrop_core::{Millis, Rgba, Surface};
use backdrop_simulation::FrameSummary;
use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use serde::Serialize;

use crate::raster::RasterSurface;
use crate::RenderError;

/// Turns a finished frame into bytes for a sink.
pub trait FrameEncoder: Send + Sync {
    /// File extension for sinks that name their output.
    fn extension(&self) -> &'static str;

    fn encode(&self, summary: &FrameSummary, now: Millis, raster: &RasterSurface) -> Result<Vec<u8>, RenderError>;
}

/// Still-image format for rendered frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Binary `P6` pixmap.
    Ppm,
    Png,
}

/// Encodes the frame flattened onto a background as an RGB image.
pub struct ImageFrameEncoder {
    pub kind: ImageKind,
    pub background: Rgba,
}

impl ImageFrameEncoder {
    pub fn new(kind: ImageKind) -> Self {
        Self { kind, background: Rgba::WHITE }
    }

    pub fn ppm() -> Self {
        Self::new(ImageKind::Ppm)
    }

    pub fn png() -> Self {
        Self::new(ImageKind::Png)
    }
}

impl FrameEncoder for ImageFrameEncoder {
    fn extension(&self) -> &'static str {
        match self.kind {
            ImageKind::Ppm => "ppm",
            ImageKind::Png => "png",
        }
    }

    fn encode(&self, _summary: &FrameSummary, _now: Millis, raster: &RasterSurface) -> Result<Vec<u8>, RenderError> {
        let (width, height) = (raster.width(), raster.height());
        let image = RgbImage::from_raw(width, height, raster.composite_rgb8(self.background))
            .ok_or(RenderError::Dimensions { width, height })?;

        let mut bytes = Vec::new();
        match self.kind {
            ImageKind::Ppm => PnmEncoder::new(&mut bytes)
                .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
                .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)?,
            ImageKind::Png => {
                PngEncoder::new(&mut bytes).write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)?
            }
        }
        Ok(bytes)
    }
}

/// What a JSON frame report contains.
#[derive(Serialize, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub time_ms: f64,
    pub width: u32,
    pub height: u32,
    pub particles: usize,
    pub links: usize,
    pub sparks: usize,
    pub snake_visible: bool,
}

impl FrameReport {
    pub fn new(summary: &FrameSummary, now: Millis, raster: &RasterSurface) -> Self {
        Self {
            frame: summary.frame,
            time_ms: now,
            width: raster.width(),
            height: raster.height(),
            particles: summary.particles,
            links: summary.links,
            sparks: summary.sparks,
            snake_visible: summary.snake_visible,
        }
    }
}

/// One JSON object per frame describing its contents, not its pixels.
pub struct JsonEncoder;

impl FrameEncoder for JsonEncoder {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, summary: &FrameSummary, now: Millis, raster: &RasterSurface) -> Result<Vec<u8>, RenderError> {
        let report = FrameReport::new(summary, now, raster);
        Ok(serde_json::to_vec(&report)?)
    }
}
