use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{StillSink, check_frame_size};
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{BloomError, BloomResult};

/// Still sink that writes a straight-alpha PNG through the `image` crate.
#[derive(Clone, Debug)]
pub struct PngSink {
    out_path: PathBuf,
}

impl PngSink {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}

impl StillSink for PngSink {
    fn write_still(&mut self, frame: &FrameRGBA) -> BloomResult<()> {
        check_frame_size(frame, frame.width, frame.height)?;
        ensure_parent_dir(&self.out_path)?;
        let rgba = frame.to_straight_rgba8();
        image::save_buffer_with_format(
            &self.out_path,
            &rgba,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| {
            BloomError::encode(format!("write png '{}': {e}", self.out_path.display()))
        })?;
        tracing::debug!(path = %self.out_path.display(), "wrote png");
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> BloomResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
