use serde::{Deserialize, Serialize};

/// Straight 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Convert to 8-bit Y, Cb, Cr (BT.601 integer coefficients, rounded, clamped to `0..=255`).
    pub fn to_yuv(self) -> Yuv {
        let r = i32::from(self.r);
        let g = i32::from(self.g);
        let b = i32::from(self.b);
        Yuv {
            y: clip(((66 * r + 129 * g + 25 * b + 128) >> 8) + 16),
            u: clip(((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128),
            v: clip(((112 * r - 94 * g - 18 * b + 128) >> 8) + 128),
        }
    }
}

fn clip(x: i32) -> u8 {
    x.clamp(0, 255) as u8
}

/// 8-bit Y, Cb, Cr triple before bit-depth scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Yuv {
    /// Luma.
    pub y: u8,
    /// Blue-difference chroma.
    pub u: u8,
    /// Red-difference chroma.
    pub v: u8,
}

/// Fixed color-bar palette, in left-to-right drawing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    /// `(255, 255, 255)`
    White,
    /// `(255, 255, 0)`
    Yellow,
    /// `(0, 255, 255)`
    Cyan,
    /// `(0, 255, 0)`
    Green,
    /// `(255, 0, 255)`
    Magenta,
    /// `(255, 0, 0)`
    Red,
    /// `(0, 0, 255)`
    Blue,
}

impl BarColor {
    /// All bars in drawing order.
    pub const ALL: [Self; 7] = [
        Self::White,
        Self::Yellow,
        Self::Cyan,
        Self::Green,
        Self::Magenta,
        Self::Red,
        Self::Blue,
    ];

    /// RGB value of this bar.
    pub fn rgb(self) -> Rgb {
        match self {
            Self::White => Rgb::new(255, 255, 255),
            Self::Yellow => Rgb::new(255, 255, 0),
            Self::Cyan => Rgb::new(0, 255, 255),
            Self::Green => Rgb::new(0, 255, 0),
            Self::Magenta => Rgb::new(255, 0, 255),
            Self::Red => Rgb::new(255, 0, 0),
            Self::Blue => Rgb::new(0, 0, 255),
        }
    }

    /// Lowercase name, as accepted by [`str::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Yellow => "yellow",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Magenta => "magenta",
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

impl std::str::FromStr for BarColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|c| c.name()).collect();
                format!("unknown color '{s}', expected one of: {}", names.join(", "))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/color.rs"]
mod tests;
