use super::*;
use kurbo::PathEl;

#[test]
fn samples_stay_within_waviness_band() {
    for &r in &[1.0, 20.0, 55.5, 400.0] {
        for p in 4..=12 {
            for &w in &[0.0, 0.1, 0.25, 0.5] {
                let pts = wavy_circle(r, p, w, 0.3);
                assert_eq!(pts.len(), SAMPLE_COUNT);
                for pt in &pts {
                    let d = pt.to_vec2().hypot();
                    assert!(d >= r * (1.0 - w) - 1e-9, "r={r} p={p} w={w} d={d}");
                    assert!(d <= r * (1.0 + w) + 1e-9, "r={r} p={p} w={w} d={d}");
                }
            }
        }
    }
}

#[test]
fn zero_waviness_is_a_circle() {
    for pt in wavy_circle(10.0, 6, 0.0, 1.0) {
        assert!((pt.to_vec2().hypot() - 10.0).abs() < 1e-9);
    }
}

#[test]
fn first_sample_uses_rotation_offset() {
    let pts = wavy_circle(10.0, 4, 0.0, std::f64::consts::FRAC_PI_2);
    assert!(pts[0].x.abs() < 1e-9);
    assert!((pts[0].y - 10.0).abs() < 1e-9);
}

#[test]
fn degenerate_radius_collapses_to_origin() {
    for r in [0.0, -5.0, f64::NAN] {
        let pts = wavy_circle(r, 6, 0.3, 0.0);
        assert_eq!(pts.len(), SAMPLE_COUNT);
        assert!(pts.iter().all(|p| *p == Point::ORIGIN));
    }
}

#[test]
fn deterministic_for_same_inputs() {
    assert_eq!(wavy_circle(33.0, 7, 0.2, 0.9), wavy_circle(33.0, 7, 0.2, 0.9));
}

#[test]
fn smooth_path_is_closed_and_starts_at_first_sample() {
    let pts = wavy_circle(30.0, 6, 0.15, 0.0);
    let path = smooth_closed_path(&pts);
    let els = path.elements();
    assert_eq!(els.first(), Some(&PathEl::MoveTo(pts[0])));
    assert_eq!(els.last(), Some(&PathEl::ClosePath));
    // The final quad ends halfway between the last sample and the first.
    let PathEl::QuadTo(ctrl, end) = els[els.len() - 2] else {
        panic!("expected quad before close");
    };
    assert_eq!(ctrl, pts[SAMPLE_COUNT - 1]);
    assert_eq!(end, pts[SAMPLE_COUNT - 1].midpoint(pts[0]));
    assert_eq!(els.len(), SAMPLE_COUNT + 1);
}

#[test]
fn empty_input_gives_empty_path() {
    assert!(smooth_closed_path(&[]).elements().is_empty());
}
