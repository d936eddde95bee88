use rand::Rng;

use crate::foundation::color::Rgba8;

/// Key of one of the built-in palettes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PaletteKey {
    #[default]
    #[serde(rename = "90sPastels")]
    NinetiesPastels,
    #[serde(rename = "y2k")]
    Y2k,
    #[serde(rename = "ohSnap")]
    OhSnap,
    #[serde(rename = "90sIcon")]
    NinetiesIcon,
    #[serde(rename = "electric")]
    Electric,
}

impl PaletteKey {
    pub fn all() -> [PaletteKey; 5] {
        [
            Self::NinetiesPastels,
            Self::Y2k,
            Self::OhSnap,
            Self::NinetiesIcon,
            Self::Electric,
        ]
    }

    /// Stable key as used in settings files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NinetiesPastels => "90sPastels",
            Self::Y2k => "y2k",
            Self::OhSnap => "ohSnap",
            Self::NinetiesIcon => "90sIcon",
            Self::Electric => "electric",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::NinetiesPastels => &NINETIES_PASTELS,
            Self::Y2k => &Y2K,
            Self::OhSnap => &OH_SNAP,
            Self::NinetiesIcon => &NINETIES_ICON,
            Self::Electric => &ELECTRIC,
        }
    }
}

/// A named, ordered set of discrete colors.
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [Rgba8],
}

const TINT_FALLBACK: Rgba8 = Rgba8::rgb(0x66, 0x7e, 0xea);

static NINETIES_PASTELS: Palette = Palette {
    name: "'90s Pastels",
    colors: &[
        Rgba8::rgb(0xa1, 0xfb, 0xb9),
        Rgba8::rgb(0xa0, 0xc0, 0xec),
        Rgba8::rgb(0xee, 0xf6, 0x6c),
        Rgba8::rgb(0xdb, 0x7b, 0xec),
    ],
};

static Y2K: Palette = Palette {
    name: "Y2K",
    colors: &[
        Rgba8::rgb(0x03, 0x61, 0x63),
        Rgba8::rgb(0xeb, 0xbe, 0x51),
        Rgba8::rgb(0xbc, 0x6f, 0x7e),
        Rgba8::rgb(0x8c, 0x09, 0x18),
    ],
};

static OH_SNAP: Palette = Palette {
    name: "Oh Snap",
    colors: &[
        Rgba8::rgb(0x1b, 0x15, 0x3b),
        Rgba8::rgb(0x32, 0xa3, 0xdb),
        Rgba8::rgb(0xd9, 0xd1, 0x30),
        Rgba8::rgb(0xe0, 0x33, 0x85),
    ],
};

static NINETIES_ICON: Palette = Palette {
    name: "'90s Icon",
    colors: &[
        Rgba8::rgb(0x72, 0x62, 0xd4),
        Rgba8::rgb(0x35, 0xbd, 0x8b),
        Rgba8::rgb(0xfc, 0xa8, 0x0e),
        Rgba8::rgb(0xc8, 0x28, 0x8f),
    ],
};

static ELECTRIC: Palette = Palette {
    name: "Electric",
    colors: &[
        Rgba8::rgb(0xfb, 0x0d, 0xf1),
        Rgba8::rgb(0x05, 0xf7, 0xcd),
        Rgba8::rgb(0xaa, 0xf6, 0x04),
        Rgba8::rgb(0xfb, 0xfc, 0x0b),
    ],
};

impl Palette {
    /// Uniformly random color from the palette.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgba8 {
        if self.colors.is_empty() {
            return TINT_FALLBACK;
        }
        self.colors[rng.gen_range(0..self.colors.len())]
    }

    /// Per-channel rounded average of the palette, used to tint the background.
    pub fn tint(&self) -> Rgba8 {
        if self.colors.is_empty() {
            return TINT_FALLBACK;
        }
        let n = self.colors.len() as f64;
        let avg = |f: fn(&Rgba8) -> u8| -> u8 {
            let sum: f64 = self.colors.iter().map(|c| f64::from(f(c))).sum();
            (sum / n).round() as u8
        };
        Rgba8::rgb(avg(|c| c.r), avg(|c| c.g), avg(|c| c.b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/palette.rs"]
mod tests;
