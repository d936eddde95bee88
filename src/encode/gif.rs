use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::png::ensure_parent_dir;
use crate::encode::sink::{AnimationConfig, AnimationSink, check_frame_size};
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{BloomError, BloomResult};
use crate::foundation::math::{flatten_premul_over_bg, premultiply_rgba8_in_place};

/// Options for [`GifSink`] output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Opaque color translucent pixels are flattened over; GIF has no partial alpha.
    pub bg_rgb: [u8; 3],
    /// GIF quantizer speed, `1..=30` (higher is faster and coarser).
    pub speed: i32,
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            bg_rgb: [255, 255, 255],
            speed: 10,
        }
    }
}

/// Animation sink that encodes a looping GIF via `image::codecs::gif`.
///
/// Frames are flattened as they arrive and encoded in `end`, so a failed capture never leaves a
/// truncated file behind.
pub struct GifSink {
    opts: GifSinkOpts,
    cfg: Option<AnimationConfig>,
    frames: Vec<Frame>,
    scratch: Vec<u8>,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            frames: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }
}

impl AnimationSink for GifSink {
    fn begin(&mut self, cfg: AnimationConfig) -> BloomResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(BloomError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        self.scratch = vec![0; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.frames = Vec::with_capacity(cfg.frame_count as usize);
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA, delay: Duration) -> BloomResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| BloomError::encode("gif sink not started"))?;
        check_frame_size(frame, cfg.width, cfg.height)?;

        if frame.premultiplied {
            flatten_premul_over_bg(&mut self.scratch, &frame.data, self.opts.bg_rgb);
        } else {
            let mut premul = frame.data.clone();
            premultiply_rgba8_in_place(&mut premul);
            flatten_premul_over_bg(&mut self.scratch, &premul, self.opts.bg_rgb);
        }

        let buffer = RgbaImage::from_raw(cfg.width, cfg.height, self.scratch.clone())
            .ok_or_else(|| BloomError::encode("gif frame buffer has the wrong length"))?;
        self.frames.push(Frame::from_parts(
            buffer,
            0,
            0,
            Delay::from_saturating_duration(delay),
        ));
        Ok(())
    }

    fn end(&mut self) -> BloomResult<()> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| BloomError::encode("gif sink not started"))?;
        let frames = std::mem::take(&mut self.frames);
        let count = frames.len();
        let path = &self.opts.out_path;

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, self.opts.speed.clamp(1, 30));
            if cfg.looping {
                encoder
                    .set_repeat(Repeat::Infinite)
                    .map_err(|e| BloomError::encode(format!("gif repeat: {e}")))?;
            }
            encoder
                .encode_frames(frames)
                .map_err(|e| BloomError::encode(format!("encode gif '{}': {e}", path.display())))?;
        }

        ensure_parent_dir(path)?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write gif '{}'", path.display()))?;

        tracing::debug!(path = %path.display(), frames = count, "wrote gif");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
