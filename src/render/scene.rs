use crate::config::palette::Palette;
use crate::flower::registry::FlowerRegistry;
use crate::foundation::color::Rgba8;
use crate::foundation::core::Point;
use crate::render::surface::Surface;

/// Alpha of both background gradient stops.
pub const BACKGROUND_ALPHA: f64 = 0.1;
/// Per-channel shift applied to the tint for the gradient's end stop.
pub const BACKGROUND_SHIFT: (i16, i16, i16) = (20, -10, 30);

/// Start and end colors of the tinted background.
pub fn background_stops(palette: &Palette) -> (Rgba8, Rgba8) {
    let tint = palette.tint();
    let (dr, dg, db) = BACKGROUND_SHIFT;
    (
        tint.with_alpha(BACKGROUND_ALPHA),
        tint.shifted(dr, dg, db).with_alpha(BACKGROUND_ALPHA),
    )
}

/// Clear the surface and paint the diagonal palette-tinted gradient.
pub fn paint_background(surface: &mut dyn Surface, palette: &Palette) {
    let canvas = surface.canvas();
    let (start, end) = background_stops(palette);
    surface.clear();
    surface.fill_linear_gradient(
        Point::ORIGIN,
        Point::new(f64::from(canvas.width), f64::from(canvas.height)),
        start,
        end,
    );
}

/// Full redraw without touching flower state: background, then every flower in insertion order.
pub fn draw_scene(surface: &mut dyn Surface, palette: &Palette, flowers: &FlowerRegistry) {
    paint_background(surface, palette);
    for flower in flowers {
        flower.render(surface);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
