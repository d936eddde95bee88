use super::*;

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn square(size: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((size, 0.0));
    p.line_to((size, size));
    p.line_to((0.0, size));
    p.close_path();
    p
}

#[test]
fn cleared_surface_reads_back_transparent() {
    let mut s = CpuSurface::new(Canvas::new(16, 8).unwrap()).unwrap();
    s.clear();
    let frame = s.read_frame().unwrap();
    assert_eq!((frame.width, frame.height), (16, 8));
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn fill_path_honors_transform() {
    let mut s = CpuSurface::new(Canvas::new(32, 32).unwrap()).unwrap();
    s.clear();
    s.fill_path(
        &square(8.0),
        Affine::translate((16.0, 16.0)),
        Rgba8::rgb(255, 0, 0),
    );
    let frame = s.read_frame().unwrap();
    assert_eq!(px(&frame, 20, 20), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 4, 4), [0, 0, 0, 0]);
}

#[test]
fn clear_drops_previous_draws() {
    let mut s = CpuSurface::new(Canvas::new(8, 8).unwrap()).unwrap();
    s.fill_path(&square(8.0), Affine::IDENTITY, Rgba8::rgb(0, 255, 0));
    s.clear();
    let frame = s.read_frame().unwrap();
    assert_eq!(px(&frame, 4, 4), [0, 0, 0, 0]);
}

#[test]
fn linear_gradient_runs_from_start_to_end() {
    let mut s = CpuSurface::new(Canvas::new(64, 64).unwrap()).unwrap();
    s.clear();
    s.fill_linear_gradient(
        Point::ORIGIN,
        Point::new(64.0, 64.0),
        Rgba8::rgb(0, 0, 0),
        Rgba8::rgb(255, 255, 255),
    );
    let frame = s.read_frame().unwrap();
    let tl = px(&frame, 0, 0);
    let br = px(&frame, 63, 63);
    assert_eq!(tl[3], 255);
    assert!(tl[0] < 16, "top-left {tl:?}");
    assert!(br[0] > 240, "bottom-right {br:?}");
}

#[test]
fn radial_disc_is_centered_on_transform_origin() {
    let mut s = CpuSurface::new(Canvas::new(32, 32).unwrap()).unwrap();
    s.clear();
    let red = Rgba8::rgb(255, 0, 0);
    s.fill_radial_disc(
        Affine::translate((16.0, 16.0)),
        8.0,
        &[GradientStop::new(0.0, red), GradientStop::new(1.0, red)],
        1.0,
    );
    let frame = s.read_frame().unwrap();
    let center = px(&frame, 16, 16);
    assert!(center[0] > 200 && center[3] > 200, "center {center:?}");
    assert_eq!(px(&frame, 1, 1), [0, 0, 0, 0]);
}

#[test]
fn degenerate_disc_and_stroke_are_skipped() {
    let mut s = CpuSurface::new(Canvas::new(8, 8).unwrap()).unwrap();
    s.clear();
    s.fill_radial_disc(Affine::IDENTITY, 0.0, &[], 1.0);
    s.stroke_path(&square(4.0), Affine::IDENTITY, Rgba8::rgb(1, 1, 1), 0.0);
    let frame = s.read_frame().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn oversized_disc_is_skipped_without_allocating() {
    let mut s = CpuSurface::new(Canvas::new(64, 64).unwrap()).unwrap();
    s.clear();
    let red = Rgba8::rgb(255, 0, 0);
    s.fill_radial_disc(
        Affine::translate((32.0, 32.0)),
        2.0e6,
        &[GradientStop::new(0.0, red), GradientStop::new(1.0, red)],
        1.0,
    );
    let frame = s.read_frame().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn disc_wider_than_surface_still_covers_it() {
    let mut s = CpuSurface::new(Canvas::new(32, 32).unwrap()).unwrap();
    s.clear();
    let red = Rgba8::rgb(255, 0, 0);
    s.fill_radial_disc(
        Affine::translate((16.0, 16.0)),
        5000.0,
        &[GradientStop::new(0.0, red), GradientStop::new(1.0, red)],
        1.0,
    );
    let frame = s.read_frame().unwrap();
    for (x, y) in [(0, 0), (16, 16), (31, 31)] {
        let p = px(&frame, x, y);
        assert!(p[0] > 200 && p[3] > 200, "({x},{y}) {p:?}");
    }
}

#[test]
fn surface_is_reusable_across_many_frames() {
    let mut s = CpuSurface::new(Canvas::new(16, 16).unwrap()).unwrap();
    for i in 0..5u8 {
        s.clear();
        s.fill_path(&square(16.0), Affine::IDENTITY, Rgba8::rgb(i * 40, 0, 0));
        let frame = s.read_frame().unwrap();
        assert_eq!(px(&frame, 8, 8), [i * 40, 0, 0, 255]);
    }
}

#[test]
fn resize_changes_readback_size() {
    let mut s = CpuSurface::new(Canvas::new(8, 8).unwrap()).unwrap();
    s.resize(Canvas::new(12, 6).unwrap()).unwrap();
    assert_eq!(s.canvas(), Canvas::new(12, 6).unwrap());
    let frame = s.read_frame().unwrap();
    assert_eq!(frame.data.len(), 12 * 6 * 4);
}
