use super::*;

#[test]
fn writes_straight_alpha_png() {
    let dir = std::env::temp_dir().join(format!("opbloom-png-{}", std::process::id()));
    let path = dir.join("nested").join("still.png");
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        // Half-transparent red (premultiplied) and opaque blue.
        data: vec![128, 0, 0, 128, 0, 0, 255, 255],
        premultiplied: true,
    };

    let mut sink = PngSink::new(&path);
    sink.write_still(&frame).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn ensure_parent_dir_accepts_bare_file_names() {
    assert!(ensure_parent_dir(Path::new("still.png")).is_ok());
}
