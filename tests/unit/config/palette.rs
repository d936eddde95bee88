use super::*;
use rand::SeedableRng;

#[test]
fn every_key_has_four_colors_and_round_trips() {
    for key in PaletteKey::all() {
        assert_eq!(key.palette().colors.len(), 4);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", key.as_str()));
        let back: PaletteKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}

#[test]
fn tint_is_rounded_channel_average() {
    let tint = PaletteKey::NinetiesPastels.palette().tint();
    assert_eq!(tint, Rgba8::rgb(195, 203, 191));
}

#[test]
fn empty_palette_falls_back() {
    let empty = Palette {
        name: "empty",
        colors: &[],
    };
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    assert_eq!(empty.tint(), Rgba8::rgb(0x66, 0x7e, 0xea));
    assert_eq!(empty.pick(&mut rng), Rgba8::rgb(0x66, 0x7e, 0xea));
}

#[test]
fn pick_only_returns_palette_members() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let palette = PaletteKey::Electric.palette();
    for _ in 0..64 {
        assert!(palette.colors.contains(&palette.pick(&mut rng)));
    }
}
