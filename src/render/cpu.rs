use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, BezPath, Canvas, FrameRGBA, Point};
use crate::foundation::error::{BloomError, BloomResult};
use crate::render::surface::{GradientStop, Surface, sample_stops};

const DISC_CACHE_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct LinearKey {
    from: [i64; 2],
    to: [i64; 2],
    start: Rgba8,
    end: Rgba8,
    w: u16,
    h: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct DiscKey {
    size: u32,
    alpha: u8,
    stops: Vec<(u16, Rgba8)>,
}

/// CPU raster surface powered by `vello_cpu`.
///
/// Draw calls are recorded into a `RenderContext` and rasterized on [`Surface::read_frame`].
/// Gradients are rasterized into image paints and cached, since a flower's center disc only
/// changes when its size does.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    linear_cache: HashMap<LinearKey, vello_cpu::Image>,
    disc_cache: HashMap<DiscKey, vello_cpu::Image>,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> BloomResult<Self> {
        let (width, height) = canvas_to_u16(canvas)?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            linear_cache: HashMap::new(),
            disc_cache: HashMap::new(),
        })
    }

    fn linear_paint(&mut self, key: LinearKey) -> BloomResult<vello_cpu::Image> {
        if let Some(img) = self.linear_cache.get(&key).cloned() {
            return Ok(img);
        }
        let (w, h) = (u32::from(key.w), u32::from(key.h));
        let from = Point::new(key.from[0] as f64 / 16.0, key.from[1] as f64 / 16.0);
        let to = Point::new(key.to[0] as f64 / 16.0, key.to[1] as f64 / 16.0);
        let axis = to - from;
        let len2 = axis.hypot2();
        let stops = [
            GradientStop::new(0.0, key.start),
            GradientStop::new(1.0, key.end),
        ];

        let mut bytes = vec![0u8; (w as usize) * (h as usize) * 4];
        for y in 0..h {
            for x in 0..w {
                let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let t = if len2 <= 0.0 {
                    0.0
                } else {
                    (p - from).dot(axis) / len2
                };
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&sample_stops(&stops, t).to_premul());
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.linear_cache.insert(key, img.clone());
        Ok(img)
    }

    fn disc_paint(&mut self, key: DiscKey, stops: &[GradientStop]) -> BloomResult<vello_cpu::Image> {
        if let Some(img) = self.disc_cache.get(&key).cloned() {
            return Ok(img);
        }
        if self.disc_cache.len() >= DISC_CACHE_CAPACITY {
            self.disc_cache.clear();
        }
        let size = key.size;
        let alpha = f64::from(key.alpha) / 255.0;
        let half = f64::from(size) / 2.0;
        let mut bytes = vec![0u8; (size as usize) * (size as usize) * 4];
        for y in 0..size {
            for x in 0..size {
                let dx = f64::from(x) + 0.5 - half;
                let dy = f64::from(y) + 0.5 - half;
                let t = (dx * dx + dy * dy).sqrt() / half;
                let c = sample_stops(stops, t);
                let c = c.with_alpha(f64::from(c.a) / 255.0 * alpha);
                let idx = ((y as usize) * (size as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c.to_premul());
            }
        }
        let img = rgba_premul_to_image(&bytes, size, size)?;
        self.disc_cache.insert(key, img.clone());
        Ok(img)
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    fn clear(&mut self) {
        self.ctx.reset();
    }

    fn fill_linear_gradient(&mut self, from: Point, to: Point, start: Rgba8, end: Rgba8) {
        // Quantize endpoints to 1/16 px so cache keys stay hashable.
        let q = |v: f64| (v * 16.0).round() as i64;
        let key = LinearKey {
            from: [q(from.x), q(from.y)],
            to: [q(to.x), q(to.y)],
            start,
            end,
            w: self.width,
            h: self.height,
        };
        let paint = match self.linear_paint(key) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "skipping background gradient");
                return;
            }
        };
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8, width: f64) {
        if color.a == 0 || width <= 0.0 {
            return;
        }
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_radial_disc(
        &mut self,
        transform: Affine,
        radius: f64,
        stops: &[GradientStop],
        alpha: f64,
    ) {
        if !(radius.is_finite() && radius > 0.0) || alpha <= 0.0 {
            return;
        }
        let diameter = (2.0 * radius).ceil().max(1.0);
        if diameter > f64::from(u16::MAX) {
            tracing::warn!(radius, "skipping radial disc larger than the raster limit");
            return;
        }
        // Discs wider than the surface are rasterized at surface resolution and scaled up.
        let max_size = 2 * u32::from(self.width.max(self.height));
        let size = (diameter as u32).min(max_size);
        let key = DiscKey {
            size,
            alpha: crate::foundation::math::unit_to_u8(alpha),
            stops: stops
                .iter()
                .map(|s| ((s.offset.clamp(0.0, 1.0) * 1000.0).round() as u16, s.color))
                .collect(),
        };
        let paint = match self.disc_paint(key, stops) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "skipping radial disc");
                return;
            }
        };

        // Image space is `size` px square; map it onto the `2 * radius` disc around the origin.
        let half = f64::from(size) / 2.0;
        let placement = transform
            * Affine::translate((-radius, -radius))
            * Affine::scale(2.0 * radius / f64::from(size));
        let circle = vello_cpu::kurbo::Shape::to_path(
            &vello_cpu::kurbo::Circle::new((half, half), half),
            0.1,
        );
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(placement));
        self.ctx.set_paint(paint);
        self.ctx.fill_path(&circle);
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn read_frame(&mut self) -> BloomResult<FrameRGBA> {
        clear_pixmap(&mut self.pixmap);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn resize(&mut self, canvas: Canvas) -> BloomResult<()> {
        let (width, height) = canvas_to_u16(canvas)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.ctx = vello_cpu::RenderContext::new(width, height);
            self.pixmap = vello_cpu::Pixmap::new(width, height);
            self.linear_cache.clear();
        }
        self.clear();
        Ok(())
    }
}

fn canvas_to_u16(canvas: Canvas) -> BloomResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| BloomError::surface("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| BloomError::surface("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(BloomError::surface("surface width/height must be non-zero"));
    }
    Ok((w, h))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> BloomResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BloomError::surface("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BloomError::surface("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(BloomError::surface("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rgba_premul_to_image(bytes_premul: &[u8], width: u32, height: u32) -> BloomResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
