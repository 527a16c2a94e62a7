use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::RenderError;

/// Sends encoded frames to a destination.
pub trait FrameSink {
    fn send(&mut self, frame: u64, extension: &str, data: &[u8]) -> Result<(), RenderError>;
}

/// Writes each frame to `frame_NNNNNN.<ext>` inside a directory.
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    /// Creates the directory if needed.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, frame: u64, extension: &str) -> PathBuf {
        self.directory.join(format!("frame_{:06}.{}", frame, extension))
    }
}

impl FrameSink for DirectorySink {
    fn send(&mut self, frame: u64, extension: &str, data: &[u8]) -> Result<(), RenderError> {
        let path = self.path_for(frame, extension);
        fs::write(&path, data)?;
        debug!("Wrote frame {} to {}", frame, path.display());
        Ok(())
    }
}

/// Streams frames to standard output, one per line.
pub struct StdoutSink {
    stdout: io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        StdoutSink { stdout: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for StdoutSink {
    fn send(&mut self, _frame: u64, _extension: &str, data: &[u8]) -> Result<(), RenderError> {
        let mut handle = self.stdout.lock();
        handle.write_all(data)?;
        handle.write_all(b"\n")?;
        handle.flush()?;
        Ok(())
    }
}

/// Discards frames, counting them.
#[derive(Debug, Default)]
pub struct NullSink {
    pub sent: u64,
}

impl FrameSink for NullSink {
    fn send(&mut self, _frame: u64, _extension: &str, _data: &[u8]) -> Result<(), RenderError> {
        self.sent += 1;
        Ok(())
    }
}
