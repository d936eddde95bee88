use super::*;

#[test]
fn hex_parse_accepts_both_forms() {
    assert_eq!(Rgba8::from_hex("#a1fbb9").unwrap(), Rgba8::rgb(0xa1, 0xfb, 0xb9));
    assert_eq!(Rgba8::from_hex("A1FBB9").unwrap(), Rgba8::rgb(0xa1, 0xfb, 0xb9));
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zzzzzz").is_err());
}

#[test]
fn hex_formats_lowercase() {
    assert_eq!(Rgba8::rgb(3, 97, 99).to_hex(), "#036163");
}

#[test]
fn hsl_primaries() {
    let (h, s, l) = Rgba8::rgb(255, 0, 0).to_hsl();
    assert_eq!(h, 0.0);
    assert!((s - 1.0).abs() < 1e-9);
    assert!((l - 0.5).abs() < 1e-9);
    assert_eq!(Rgba8::from_hsl(120.0, 1.0, 0.5), Rgba8::rgb(0, 255, 0));
    assert_eq!(Rgba8::from_hsl(240.0, 1.0, 0.5), Rgba8::rgb(0, 0, 255));
}

#[test]
fn grey_has_zero_saturation() {
    let (_, s, l) = Rgba8::rgb(128, 128, 128).to_hsl();
    assert_eq!(s, 0.0);
    assert!((l - 128.0 / 255.0).abs() < 1e-9);
}

#[test]
fn accent_rotates_hue_by_thirty_degrees() {
    let accent = Rgba8::rgb(255, 0, 0).accent();
    let (h, s, l) = accent.to_hsl();
    assert!((h - 30.0).abs() < 1.0, "hue was {h}");
    assert!((s - 0.8).abs() < 0.02);
    assert!((l - 0.5).abs() < 0.01);
    assert_eq!(accent.a, 255);
}

#[test]
fn shifted_clamps() {
    let c = Rgba8::rgb(250, 5, 240).shifted(20, -10, 30);
    assert_eq!(c, Rgba8::rgb(255, 0, 255));
}

#[test]
fn with_alpha_rounds_into_u8() {
    assert_eq!(Rgba8::rgb(1, 2, 3).with_alpha(0.5).a, 128);
    assert_eq!(Rgba8::rgb(1, 2, 3).with_alpha(2.0).a, 255);
}

#[test]
fn premul_scales_rgb() {
    assert_eq!(Rgba8::rgba(255, 0, 0, 128).to_premul(), [128, 0, 0, 128]);
}
