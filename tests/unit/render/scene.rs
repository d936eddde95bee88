use super::*;
use crate::config::palette::PaletteKey;
use crate::config::settings::Settings;
use crate::flower::entity::{Flower, FlowerSpec};
use crate::foundation::core::Canvas;
use crate::render::surface::{DrawCall, RecordingSurface};
use rand::SeedableRng;

#[test]
fn background_is_tint_and_shifted_tint_at_low_alpha() {
    let (start, end) = background_stops(PaletteKey::NinetiesPastels.palette());
    assert_eq!((start.r, start.g, start.b), (195, 203, 191));
    assert_eq!((end.r, end.g, end.b), (215, 193, 221));
    assert_eq!(start.a, Rgba8::rgb(0, 0, 0).with_alpha(0.1).a);
    assert_eq!(start.a, end.a);
}

#[test]
fn background_runs_corner_to_corner_after_clear() {
    let mut s = RecordingSurface::new(Canvas::new(320, 240).unwrap());
    paint_background(&mut s, PaletteKey::Electric.palette());
    match s.calls() {
        [DrawCall::Clear, DrawCall::LinearGradient { from, to, .. }] => {
            assert_eq!(*from, Point::ORIGIN);
            assert_eq!(*to, Point::new(320.0, 240.0));
        }
        other => panic!("unexpected calls: {other:?}"),
    }
}

#[test]
fn draw_scene_renders_flowers_without_mutating_them() {
    let settings = Settings::default();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    let mut flowers = FlowerRegistry::new();
    for x in [50.0, 150.0] {
        let mut f = Flower::new(FlowerSpec::from_settings(Point::new(x, 50.0), &settings, &mut rng));
        for _ in 0..10 {
            f.advance_growth();
        }
        flowers.push(f);
    }
    let before = flowers.rotations();

    let mut s = RecordingSurface::new(Canvas::new(200, 100).unwrap());
    draw_scene(&mut s, settings.palette(), &flowers);

    assert_eq!(flowers.rotations(), before);
    assert!(matches!(s.calls()[1], DrawCall::LinearGradient { .. }));
    let fills = s
        .calls()
        .iter()
        .filter(|c| matches!(c, DrawCall::FillPath { .. }))
        .count();
    assert!(fills >= 2);
}
