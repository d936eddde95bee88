use std::time::Duration;

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{BloomError, BloomResult};

/// Configuration provided to an [`AnimationSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u32,
    /// Play the animation forever.
    pub looping: bool,
}

/// Consumer of a single captured raster.
pub trait StillSink {
    /// Write one frame as the whole output.
    fn write_still(&mut self, frame: &FrameRGBA) -> BloomResult<()>;
}

/// Consumer of an ordered list of frames, each with its own display delay.
///
/// Ordering contract: `push_frame` is called in capture order between exactly one `begin` and
/// one `end`. Errors from any call abort the animation.
pub trait AnimationSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: AnimationConfig) -> BloomResult<()>;
    /// Push the next frame.
    fn push_frame(&mut self, frame: &FrameRGBA, delay: Duration) -> BloomResult<()>;
    /// Finalize and emit the encoded asset.
    fn end(&mut self) -> BloomResult<()>;
}

/// In-memory still sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryStill {
    /// Every still written, oldest first.
    pub(crate) stills: Vec<FrameRGBA>,
}

impl InMemoryStill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stills(&self) -> &[FrameRGBA] {
        &self.stills
    }
}

impl StillSink for InMemoryStill {
    fn write_still(&mut self, frame: &FrameRGBA) -> BloomResult<()> {
        self.stills.push(frame.clone());
        Ok(())
    }
}

/// In-memory animation sink for tests and debugging.
///
/// `fail_after` makes `push_frame` fail once that many frames were accepted, to exercise the
/// export fallback.
#[derive(Debug, Default)]
pub struct InMemoryAnimation {
    cfg: Option<AnimationConfig>,
    pub(crate) frames: Vec<(FrameRGBA, Duration)>,
    finished: bool,
    fail_after: Option<usize>,
}

impl InMemoryAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(frames: usize) -> Self {
        Self {
            fail_after: Some(frames),
            ..Self::default()
        }
    }

    pub fn config(&self) -> Option<AnimationConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameRGBA, Duration)] {
        &self.frames
    }

    /// `true` once `end` completed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl AnimationSink for InMemoryAnimation {
    fn begin(&mut self, cfg: AnimationConfig) -> BloomResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA, delay: Duration) -> BloomResult<()> {
        if self.cfg.is_none() {
            return Err(BloomError::encode("animation sink not started"));
        }
        if self.fail_after.is_some_and(|n| self.frames.len() >= n) {
            return Err(BloomError::encode("simulated encoder failure"));
        }
        self.frames.push((frame.clone(), delay));
        Ok(())
    }

    fn end(&mut self) -> BloomResult<()> {
        if self.cfg.is_none() {
            return Err(BloomError::encode("animation sink not started"));
        }
        self.finished = true;
        Ok(())
    }
}

/// Reject frames whose size differs from the configured output.
pub(crate) fn check_frame_size(frame: &FrameRGBA, width: u32, height: u32) -> BloomResult<()> {
    if frame.width != width || frame.height != height {
        return Err(BloomError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, width, height
        )));
    }
    if frame.data.len() != frame.canvas().byte_len() {
        return Err(BloomError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
