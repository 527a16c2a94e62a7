//! Concrete drawing targets and frame output.
//!
//! [`RasterSurface`] is the software canvas the frame driver draws into.
//! Finished frames go through a [`FrameEncoder`] and a [`FrameSink`], the
//! same encode-then-send split the rest of the workspace relies on to keep
//! formats and destinations independent.

mod encode;
mod output;
mod raster;
mod sink;

use std::io;
use thiserror::Error;

pub use encode::{FrameEncoder, FrameReport, ImageFrameEncoder, ImageKind, JsonEncoder};
pub use output::FrameOutput;
pub use raster::RasterSurface;
pub use sink::{DirectorySink, FrameSink, NullSink, StdoutSink};

// --- Error Type ---
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write frame: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize frame report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to encode frame image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid surface dimensions {width}x{height}")]
    Dimensions { width: u32, height: u32 },
}
