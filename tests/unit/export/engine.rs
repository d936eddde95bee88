use super::*;
use crate::config::settings::{RotationDirection, Settings};
use crate::encode::sink::{InMemoryAnimation, InMemoryStill};
use crate::interaction::controller::PointerEvent;
use crate::render::surface::RecordingSurface;

fn canvas_with(settings: Settings, flowers: usize) -> BloomCanvas {
    let surface = RecordingSurface::new(Canvas::new(120, 80).unwrap());
    let mut c = BloomCanvas::new(Box::new(surface), settings, 11);
    for i in 0..flowers {
        let at = Duration::from_millis(i as u64 * 100);
        c.handle_pointer(
            PointerEvent::Down {
                x: 20.0 + 30.0 * i as f64,
                y: 40.0,
            },
            at,
        );
        c.tick();
        c.handle_pointer(PointerEvent::Up, at);
    }
    c
}

#[test]
fn delay_is_a_fifteenth_of_a_second() {
    assert_eq!(EXPORT_FRAMES, 40);
    assert_eq!(EXPORT_FRAME_DELAY.as_micros(), 66_666);
}

#[test]
fn animated_export_restores_rotations_and_clears_flag() {
    let mut c = canvas_with(Settings::default(), 3);
    let before = c.flowers().rotations();
    let mut anim = InMemoryAnimation::new();
    let mut still = InMemoryStill::new();

    let out = export_animation(&mut c, &mut anim, &mut still).unwrap();

    assert_eq!(out, ExportOutcome::Animated { frames: 40 });
    assert_eq!(c.flowers().rotations(), before);
    assert!(!c.is_exporting());
    assert_eq!(anim.frames().len(), 40);
    assert!(anim.frames().iter().all(|(_, d)| *d == EXPORT_FRAME_DELAY));
    assert!(anim.is_finished());
    assert!(anim.config().unwrap().looping);
    assert!(still.stills().is_empty());
}

#[test]
fn each_flower_turns_exactly_once_in_its_direction() {
    let settings = Settings {
        rotation_direction: RotationDirection::Random,
        ..Settings::default()
    };
    let c = canvas_with(settings, 6);
    let job = ExportJob::new(c.flowers(), c.canvas());
    for (i, flower) in c.flowers().iter().enumerate() {
        let start = job.rotation_at(i, 0).unwrap();
        assert_eq!(start, flower.rotation());
        let step = job.rotation_at(i, 1).unwrap() - start;
        assert!((step - TAU / 40.0 * flower.direction()).abs() < 1e-12);
        // Frame 40 would land on a full turn, i.e. frame 0 again.
        let full = start + 40.0 * step;
        assert!((full - start - TAU * flower.direction()).abs() < 1e-9);
    }
    assert_eq!(job.rotation_at(6, 0), None);
}

#[test]
fn job_steps_are_explicit_and_finite() {
    let mut c = canvas_with(Settings::default(), 1);
    let mut job = ExportJob::new(c.flowers(), c.canvas());
    let mut sink = InMemoryAnimation::new();
    let (surface, palette, flowers) = c.export_parts().unwrap();

    let mut steps = 0;
    while job.step(surface, palette, flowers, &mut sink).unwrap() == StepStatus::Pending {
        steps += 1;
    }
    // begin + 40 frames, then the finishing step reports completion.
    assert_eq!(steps, 41);
    assert!(job.is_done());
    assert_eq!(
        job.step(surface, palette, flowers, &mut sink).unwrap(),
        StepStatus::Complete
    );
    assert_eq!(sink.frames().len(), 40);
}

#[test]
fn empty_registry_matches_direct_still_export() {
    let mut c = canvas_with(Settings::default(), 0);
    let mut anim = InMemoryAnimation::new();
    let mut via_anim = InMemoryStill::new();
    let out = export_animation(&mut c, &mut anim, &mut via_anim).unwrap();
    assert_eq!(out, ExportOutcome::Still);
    assert!(anim.config().is_none());

    let mut direct = InMemoryStill::new();
    assert_eq!(export_still(&mut c, &mut direct).unwrap(), ExportOutcome::Still);
    assert_eq!(via_anim.stills(), direct.stills());
}

#[test]
fn encoder_failure_falls_back_to_still_and_restores_state() {
    let mut c = canvas_with(Settings::default(), 2);
    let before = c.flowers().rotations();
    let mut anim = InMemoryAnimation::failing_after(5);
    let mut still = InMemoryStill::new();

    let out = export_animation(&mut c, &mut anim, &mut still).unwrap();

    match out {
        ExportOutcome::StillFallback { reason } => {
            assert!(reason.contains("simulated encoder failure"))
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(still.stills().len(), 1);
    assert_eq!(c.flowers().rotations(), before);
    assert!(!c.is_exporting());
    assert!(!anim.is_finished());
}

#[test]
fn detached_canvas_skips_export() {
    let mut c = BloomCanvas::detached(Canvas::new(10, 10).unwrap(), Settings::default(), 0);
    c.handle_pointer(PointerEvent::Down { x: 1.0, y: 1.0 }, Duration::ZERO);
    let mut anim = InMemoryAnimation::new();
    let mut still = InMemoryStill::new();
    assert_eq!(
        export_animation(&mut c, &mut anim, &mut still).unwrap(),
        ExportOutcome::Skipped
    );
    assert_eq!(
        export_still(&mut c, &mut still).unwrap(),
        ExportOutcome::Skipped
    );
    assert!(still.stills().is_empty());
}

#[test]
fn live_loop_resumes_after_export() {
    let mut c = canvas_with(Settings::default(), 1);
    let mut anim = InMemoryAnimation::new();
    let mut still = InMemoryStill::new();
    export_animation(&mut c, &mut anim, &mut still).unwrap();
    let before = c.flowers().get(0).unwrap().rotation();
    assert_eq!(
        c.tick(),
        crate::canvas::bloom::TickStatus::Rendered
    );
    let speed = c.flowers().get(0).unwrap().rotation_speed();
    assert!((c.flowers().get(0).unwrap().rotation() - (before + speed)).abs() < 1e-12);
}
