use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, BezPath, Canvas, FrameRGBA, Point};
use crate::foundation::error::BloomResult;

/// One color stop of a gradient, `offset` in `[0,1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba8,
}

impl GradientStop {
    pub fn new(offset: f64, color: Rgba8) -> Self {
        Self { offset, color }
    }
}

/// Sample a piecewise-linear gradient at `t` (clamped to the first/last stop).
pub fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba8 {
    let Some(first) = stops.first() else {
        return Rgba8::rgba(0, 0, 0, 0);
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
            let mix = |x: u8, y: u8| -> u8 {
                crate::foundation::math::lerp(f64::from(x), f64::from(y), u)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            return Rgba8::rgba(
                mix(a.color.r, b.color.r),
                mix(a.color.g, b.color.g),
                mix(a.color.b, b.color.b),
                mix(a.color.a, b.color.a),
            );
        }
    }
    stops[stops.len() - 1].color
}

/// 2D drawing primitives the engine needs from its host.
///
/// Paths are given in local coordinates and placed with `transform`; flowers use
/// `translate(center) * rotate(angle)`. Colors are straight alpha.
pub trait Surface {
    /// Backing size in pixels.
    fn canvas(&self) -> Canvas;

    /// Drop everything drawn since the last clear.
    fn clear(&mut self);

    /// Fill the full surface with a linear gradient running from `from` to `to`.
    fn fill_linear_gradient(&mut self, from: Point, to: Point, start: Rgba8, end: Rgba8);

    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8);

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8, width: f64);

    /// Fill a disc of `radius` centered on the local origin with a radial gradient.
    fn fill_radial_disc(
        &mut self,
        transform: Affine,
        radius: f64,
        stops: &[GradientStop],
        alpha: f64,
    );

    /// Rasterize and read back the current content.
    fn read_frame(&mut self) -> BloomResult<FrameRGBA>;

    /// Change the backing size; content is cleared.
    fn resize(&mut self, canvas: Canvas) -> BloomResult<()>;
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    LinearGradient {
        from: Point,
        to: Point,
        start: Rgba8,
        end: Rgba8,
    },
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Rgba8,
    },
    StrokePath {
        path: BezPath,
        transform: Affine,
        color: Rgba8,
        width: f64,
    },
    RadialDisc {
        transform: Affine,
        radius: f64,
        stops: Vec<GradientStop>,
        alpha: f64,
    },
}

/// Surface that records draw calls instead of rasterizing; for tests and debugging.
///
/// `read_frame` returns a transparent frame of the recorded size.
#[derive(Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    calls: Vec<DrawCall>,
    frames_read: u64,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            calls: Vec::new(),
            frames_read: 0,
        }
    }

    /// Calls recorded since the last clear (the clear itself included).
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
    }

    fn fill_linear_gradient(&mut self, from: Point, to: Point, start: Rgba8, end: Rgba8) {
        self.calls.push(DrawCall::LinearGradient {
            from,
            to,
            start,
            end,
        });
    }

    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8) {
        self.calls.push(DrawCall::FillPath {
            path: path.clone(),
            transform,
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8, width: f64) {
        self.calls.push(DrawCall::StrokePath {
            path: path.clone(),
            transform,
            color,
            width,
        });
    }

    fn fill_radial_disc(
        &mut self,
        transform: Affine,
        radius: f64,
        stops: &[GradientStop],
        alpha: f64,
    ) {
        self.calls.push(DrawCall::RadialDisc {
            transform,
            radius,
            stops: stops.to_vec(),
            alpha,
        });
    }

    fn read_frame(&mut self) -> BloomResult<FrameRGBA> {
        self.frames_read += 1;
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: vec![0; self.canvas.byte_len()],
            premultiplied: true,
        })
    }

    fn resize(&mut self, canvas: Canvas) -> BloomResult<()> {
        self.canvas = canvas;
        self.calls.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
