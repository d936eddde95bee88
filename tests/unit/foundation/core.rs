use super::*;

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(64, 32).unwrap();
    assert_eq!(c.byte_len(), 64 * 32 * 4);
}

#[test]
fn straight_conversion_leaves_straight_frames_alone() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![200, 100, 50, 128],
        premultiplied: false,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![200, 100, 50, 128]);
}

#[test]
fn straight_conversion_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![128, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![255, 0, 0, 128]);
}
