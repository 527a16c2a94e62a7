//! Runs the backdrop as a fixed-rate frame loop.
//!
//! The binary in `main.rs` parses arguments and owns the loop; everything
//! it drives lives here so integration tests can run sessions directly.

pub mod app;
pub mod script;
pub mod stats;

use backdrop_config::{ConfigError, EncodingType, OutputSettings, SinkType};
use backdrop_render::{
    DirectorySink, FrameEncoder, FrameOutput, FrameSink, ImageFrameEncoder, JsonEncoder, NullSink, RenderError,
    StdoutSink,
};
use thiserror::Error;

pub use app::App;
pub use script::{load_script, parse_script, spawn_replay, ScriptCursor, ScriptEntry, ScriptError};
pub use stats::{FrameStats, StatsSummary};

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("Failed to set up frame statistics: {0}")]
    Stats(#[from] hdrhistogram::CreationError),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Encoder and sink for the configured output, or `None` when frames are
/// not kept.
pub fn build_output(settings: &OutputSettings) -> Result<Option<FrameOutput>, RenderError> {
    let encoder: Box<dyn FrameEncoder> = match settings.encoding {
        EncodingType::Ppm => Box::new(ImageFrameEncoder::ppm()),
        EncodingType::Png => Box::new(ImageFrameEncoder::png()),
        EncodingType::Json => Box::new(JsonEncoder),
        EncodingType::None => return Ok(None),
    };
    let sink: Box<dyn FrameSink> = match settings.sink {
        SinkType::Directory => Box::new(DirectorySink::new(&settings.directory)?),
        SinkType::Stdout => Box::new(StdoutSink::new()),
        SinkType::Null => Box::new(NullSink::default()),
    };
    Ok(Some(FrameOutput::new(encoder, sink, settings.every_n_frames)))
}
