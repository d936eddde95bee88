use crate::foundation::error::{BloomError, BloomResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Pixel size of a drawing surface's backing store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> BloomResult<Self> {
        if width == 0 || height == 0 {
            return Err(BloomError::validation("canvas width/height must be non-zero"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(BloomError::validation(format!(
                "canvas {width}x{height} exceeds the raster limit of {}",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    pub fn byte_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// A captured frame as RGBA8 pixels.
///
/// Surfaces hand out **premultiplied** pixels; sinks that need straight alpha convert at the
/// boundary. The `premultiplied` flag makes the encoding explicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Return straight-alpha RGBA8 bytes regardless of the stored encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            crate::foundation::math::unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
