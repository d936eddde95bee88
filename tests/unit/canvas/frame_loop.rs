use super::*;
use crate::config::settings::Settings;
use crate::foundation::core::Canvas;
use crate::interaction::controller::PointerEvent;
use crate::render::surface::RecordingSurface;

fn canvas() -> BloomCanvas {
    let surface = RecordingSurface::new(Canvas::new(100, 100).unwrap());
    BloomCanvas::new(Box::new(surface), Settings::default(), 0)
}

#[test]
fn fixed_frames_are_evenly_spaced_and_finite() {
    let mut src = FixedFrames::starting_at(3, Duration::from_millis(5))
        .with_interval(Duration::from_millis(10));
    assert_eq!(src.next_frame(), Some(Duration::from_millis(5)));
    assert_eq!(src.next_frame(), Some(Duration::from_millis(15)));
    assert_eq!(src.next_frame(), Some(Duration::from_millis(25)));
    assert_eq!(src.next_frame(), None);
    assert_eq!(src.remaining(), 0);
}

#[test]
fn loop_runs_until_source_is_exhausted() {
    let mut c = canvas();
    c.handle_pointer(PointerEvent::Down { x: 50.0, y: 50.0 }, Duration::ZERO);
    let stats = RenderLoop::new(FixedFrames::new(8)).run(&mut c);
    assert_eq!(stats.rendered, 8);
    assert_eq!(stats.skipped, 0);
    assert_eq!(c.frames_rendered(), 8);
    assert!((c.flowers().get(0).unwrap().bloom_progress() - 0.2).abs() < 1e-12);
}

#[test]
fn loop_stops_after_shutdown() {
    let mut c = canvas();
    c.shutdown();
    let mut lp = RenderLoop::new(FixedFrames::new(5));
    let stats = lp.run(&mut c);
    assert_eq!(stats, LoopStats::default());
    assert_eq!(lp.source().remaining(), 5);
}

#[test]
fn detached_canvas_counts_skips() {
    let mut c = BloomCanvas::detached(Canvas::new(10, 10).unwrap(), Settings::default(), 0);
    let stats = RenderLoop::new(FixedFrames::new(3)).run(&mut c);
    assert_eq!(stats.rendered, 0);
    assert_eq!(stats.skipped, 3);
    assert!(stats.last_frame_at.is_some());
}
