use crate::config::palette::{Palette, PaletteKey};

/// Rotation direction applied to newly created flowers.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    Left,
    #[default]
    Right,
    Random,
}

impl RotationDirection {
    /// Signed multiplier for a forced direction; `None` for `Random`.
    pub fn forced_sign(self) -> Option<f64> {
        match self {
            Self::Left => Some(-1.0),
            Self::Right => Some(1.0),
            Self::Random => None,
        }
    }
}

/// Process-wide defaults for newly created flowers.
///
/// The engine reads this on every flower creation and every frame, but never validates it.
/// Hosts that accept untrusted values can call [`Settings::clamped`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Fraction of the radius used as petal amplitude, `[0, 0.5]`.
    pub waviness: f64,
    /// Petals per ring, `[4, 12]`.
    pub petal_count: u32,
    /// Base radius before scale, `[20, 80]`.
    pub base_radius: f64,
    pub selected_palette: PaletteKey,
    /// Bloom progress added per growing frame.
    pub bloom_speed: f64,
    /// Rotation magnitude in radians per frame, `[0, 0.05]`.
    pub rotation_speed: f64,
    /// `[0.1, 1]`
    pub opacity: f64,
    /// `[2, 6]`
    pub layer_count: u32,
    /// `[0.5, 5]`
    pub scale: f64,
    pub rotation_direction: RotationDirection,
    pub animation_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            waviness: 0.15,
            petal_count: 6,
            base_radius: 50.0,
            selected_palette: PaletteKey::default(),
            bloom_speed: 0.025,
            rotation_speed: 0.01,
            opacity: 0.8,
            layer_count: 4,
            scale: 1.0,
            rotation_direction: RotationDirection::default(),
            animation_enabled: true,
        }
    }
}

impl Settings {
    pub fn palette(&self) -> &'static Palette {
        self.selected_palette.palette()
    }

    /// Copy with every numeric field clamped to its documented range.
    pub fn clamped(&self) -> Self {
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        let d = Self::default();
        Self {
            waviness: finite_or(self.waviness, d.waviness).clamp(0.0, 0.5),
            petal_count: self.petal_count.clamp(4, 12),
            base_radius: finite_or(self.base_radius, d.base_radius).clamp(20.0, 80.0),
            selected_palette: self.selected_palette,
            bloom_speed: finite_or(self.bloom_speed, d.bloom_speed).max(0.0),
            rotation_speed: finite_or(self.rotation_speed, d.rotation_speed).clamp(0.0, 0.05),
            opacity: finite_or(self.opacity, d.opacity).clamp(0.1, 1.0),
            layer_count: self.layer_count.clamp(2, 6),
            scale: finite_or(self.scale, d.scale).clamp(0.5, 5.0),
            rotation_direction: self.rotation_direction,
            animation_enabled: self.animation_enabled,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
