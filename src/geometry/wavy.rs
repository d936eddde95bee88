//! Wavy-edged circles: the outline every flower layer is built from.

use std::f64::consts::TAU;

use crate::foundation::core::{BezPath, Point};

/// Samples per outline.
pub const SAMPLE_COUNT: usize = 64;

/// Sample a circle whose radius is perturbed by a sinusoid of frequency `petal_count`.
///
/// For sample angle `θ = i/N · 2π + rotation`:
/// `r(θ) = radius + sin(θ · petal_count) · waviness · radius`, point `= (cos θ · r, sin θ · r)`.
///
/// The returned sequence is implicitly closed: the last sample connects back to the first.
/// A non-positive (or non-finite) radius collapses every sample onto the origin.
pub fn wavy_circle(radius: f64, petal_count: u32, waviness: f64, rotation: f64) -> Vec<Point> {
    if !(radius.is_finite() && radius > 0.0) {
        return vec![Point::ORIGIN; SAMPLE_COUNT];
    }

    let petals = f64::from(petal_count);
    (0..SAMPLE_COUNT)
        .map(|i| {
            let theta = (i as f64 / SAMPLE_COUNT as f64) * TAU + rotation;
            let r = radius + (theta * petals).sin() * waviness * radius;
            Point::new(theta.cos() * r, theta.sin() * r)
        })
        .collect()
}

/// Build a smooth closed outline through `points`.
///
/// Starts at the first sample, then draws a quadratic through each following sample to the
/// midpoint between it and its successor, and closes back to the start.
pub fn smooth_closed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);
    let n = points.len();
    for i in 1..n {
        let current = points[i];
        let next = points[(i + 1) % n];
        path.quad_to(current, current.midpoint(next));
    }
    path.close_path();
    path
}

/// Convenience: [`wavy_circle`] followed by [`smooth_closed_path`].
pub fn wavy_path(radius: f64, petal_count: u32, waviness: f64, rotation: f64) -> BezPath {
    smooth_closed_path(&wavy_circle(radius, petal_count, waviness, rotation))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/wavy.rs"]
mod tests;
