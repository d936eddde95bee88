//! A single bloom: creation parameters, growth/rotation state and its draw routine.

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::settings::{RotationDirection, Settings};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Affine, Point};
use crate::foundation::math::clamp01;
use crate::geometry::wavy::wavy_path;
use crate::render::surface::{GradientStop, Surface};

/// Radius of a layer's inset ring relative to the layer.
const INSET_RADIUS_FACTOR: f64 = 0.6;
/// Layer progress past which the inset ring appears.
const INSET_VISIBLE_AFTER: f64 = 0.3;
const INSET_ALPHA_FACTOR: f64 = 0.6;
/// Center disc radius relative to the base radius.
const CENTER_RADIUS_FACTOR: f64 = 0.15;
/// Overall progress past which the center disc appears.
const CENTER_VISIBLE_AFTER: f64 = 0.1;
const OUTLINE_WIDTH: f64 = 1.0;

/// Immutable creation parameters of a flower.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlowerSpec {
    pub center: Point,
    /// Already scaled.
    pub base_radius: f64,
    /// At least 4.
    pub petal_count: u32,
    /// Fraction of the radius, `[0, 0.5]`.
    pub waviness: f64,
    /// At least 2.
    pub layer_count: u32,
    pub color: Rgba8,
    pub accent: Rgba8,
    pub opacity: f64,
    pub bloom_speed: f64,
    /// Unsigned rotation speed in radians per frame.
    pub rotation_speed: f64,
    /// `-1.0` (left) or `1.0` (right).
    pub direction: f64,
    pub initial_rotation: f64,
}

impl FlowerSpec {
    /// Derive a flower from the current settings, jittering radius, petals and speed.
    pub fn from_settings<R: Rng + ?Sized>(center: Point, settings: &Settings, rng: &mut R) -> Self {
        let base = settings.base_radius;
        let base_radius = (base + (rng.r#gen::<f64>() - 0.5) * base * 0.2) * settings.scale;
        let jittered_petals = f64::from(settings.petal_count) + (rng.r#gen::<f64>() - 0.5) * 2.0;
        let petal_count = jittered_petals.floor().max(4.0) as u32;
        let color = settings.palette().pick(rng);
        let rotation_speed = settings.rotation_speed * (0.5 + rng.r#gen::<f64>());
        let initial_rotation = rng.r#gen::<f64>() * TAU;
        let direction = match settings.rotation_direction.forced_sign() {
            Some(sign) => sign,
            None if rng.r#gen::<bool>() => 1.0,
            None => -1.0,
        };

        Self {
            center,
            base_radius,
            petal_count,
            waviness: settings.waviness,
            layer_count: settings.layer_count.max(2),
            color,
            accent: color.accent(),
            opacity: settings.opacity,
            bloom_speed: settings.bloom_speed,
            rotation_speed: rotation_speed.abs(),
            direction,
            initial_rotation,
        }
    }
}

/// Visible fraction of layer `layer` (0 = innermost) at overall bloom `progress`.
///
/// 0 below `layer/layer_count`, 1 at or above `(layer+1)/layer_count`, linear in between.
pub fn layer_progress(progress: f64, layer: u32, layer_count: u32) -> f64 {
    let n = f64::from(layer_count.max(1));
    clamp01((progress - f64::from(layer) / n) * n)
}

/// A live flower.
#[derive(Clone, Debug, PartialEq)]
pub struct Flower {
    spec: FlowerSpec,
    /// Radians, unbounded.
    rotation: f64,
    /// Signed per-frame rotation.
    rotation_speed: f64,
    direction: f64,
    /// Unbounded and non-decreasing.
    bloom_progress: f64,
    active: bool,
}

impl Flower {
    pub fn new(spec: FlowerSpec) -> Self {
        let direction = if spec.direction < 0.0 { -1.0 } else { 1.0 };
        Self {
            rotation: spec.initial_rotation,
            rotation_speed: spec.rotation_speed.abs() * direction,
            direction,
            bloom_progress: 0.0,
            active: true,
            spec,
        }
    }

    pub fn spec(&self) -> &FlowerSpec {
        &self.spec
    }

    pub fn center(&self) -> Point {
        self.spec.center
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Overwrite the rotation angle; used by the export engine.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    /// `-1.0` or `1.0`.
    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn bloom_progress(&self) -> f64 {
        self.bloom_progress
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance rotation by one frame.
    ///
    /// A forced global direction re-signs the speed (magnitude kept); `Random` keeps the
    /// direction chosen at creation.
    pub fn advance_rotation(&mut self, global: Option<RotationDirection>) {
        if let Some(sign) = global.and_then(RotationDirection::forced_sign) {
            self.direction = sign;
            self.rotation_speed = self.rotation_speed.abs() * sign;
        }
        self.rotation += self.rotation_speed;
    }

    /// Grow by one frame's bloom speed; no-op once deactivated.
    pub fn advance_growth(&mut self) {
        if !self.active {
            return;
        }
        self.bloom_progress += self.spec.bloom_speed.max(0.0);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Local-to-surface placement: translate to the center, then rotate.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.spec.center.to_vec2()) * Affine::rotate(self.rotation)
    }

    /// Draw all layers, inset rings and the center disc.
    ///
    /// Layers are painted outermost first so inner layers stay on top.
    pub fn render(&self, surface: &mut dyn Surface) {
        let spec = &self.spec;
        let transform = self.transform();
        let layers = spec.layer_count.max(1);

        for layer in (0..layers).rev() {
            let lp = layer_progress(self.bloom_progress, layer, layers);
            if lp <= 0.0 {
                continue;
            }

            let radius = spec.base_radius * f64::from(layer + 1) / f64::from(layers) * lp;
            let (fill, swapped) = if layer % 2 == 0 {
                (spec.color, spec.accent)
            } else {
                (spec.accent, spec.color)
            };
            let alpha = spec.opacity * lp;

            let outline = wavy_path(radius, spec.petal_count, spec.waviness, 0.0);
            surface.fill_path(&outline, transform, fill.with_alpha(alpha));
            surface.stroke_path(
                &outline,
                transform,
                swapped.with_alpha(alpha),
                OUTLINE_WIDTH,
            );

            if lp > INSET_VISIBLE_AFTER {
                let inset = wavy_path(
                    radius * INSET_RADIUS_FACTOR,
                    spec.petal_count,
                    spec.waviness * 0.5,
                    0.0,
                );
                surface.fill_path(
                    &inset,
                    transform,
                    swapped.with_alpha(alpha * INSET_ALPHA_FACTOR),
                );
            }
        }

        if self.bloom_progress > CENTER_VISIBLE_AFTER {
            let radius = spec.base_radius * CENTER_RADIUS_FACTOR * self.bloom_progress.min(1.0);
            let stops = [
                GradientStop::new(0.0, spec.accent),
                GradientStop::new(0.5, spec.color),
                GradientStop::new(1.0, spec.accent),
            ];
            surface.fill_radial_disc(transform, radius, &stops, spec.opacity);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flower/entity.rs"]
mod tests;
