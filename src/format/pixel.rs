//! Mapping from configured sample format to the constants the drawing loops need.
//!
//! Everything here is resolved once when a generator is initialized; the per-frame code only
//! branches on [`PixelLayout::bytes_per_sample`].

use serde::{Deserialize, Serialize};

/// Chroma subsampling mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsampling {
    /// Luma only; both chroma planes are empty.
    #[serde(rename = "4:0:0")]
    Yuv400,
    /// Chroma halved horizontally and vertically.
    #[default]
    #[serde(rename = "4:2:0")]
    Yuv420,
    /// Chroma halved horizontally.
    #[serde(rename = "4:2:2")]
    Yuv422,
    /// Full-resolution chroma.
    #[serde(rename = "4:4:4")]
    Yuv444,
}

impl Subsampling {
    /// Resolve a numeric code such as `420`. Unknown codes select 4:2:0.
    pub fn from_code(code: u32) -> Self {
        match code {
            400 => Self::Yuv400,
            422 => Self::Yuv422,
            444 => Self::Yuv444,
            _ => Self::Yuv420,
        }
    }

    /// Numeric code of this mode (`400`, `420`, `422` or `444`).
    pub fn code(self) -> u32 {
        match self {
            Self::Yuv400 => 400,
            Self::Yuv420 => 420,
            Self::Yuv422 => 422,
            Self::Yuv444 => 444,
        }
    }

    /// Horizontal and vertical chroma decimation.
    pub fn decimation(self) -> ChromaDecimation {
        let (horizontal, vertical) = match self {
            Self::Yuv400 => (Decimation::Drop, Decimation::Drop),
            Self::Yuv420 => (Decimation::Half, Decimation::Half),
            Self::Yuv422 => (Decimation::Half, Decimation::Full),
            Self::Yuv444 => (Decimation::Full, Decimation::Full),
        };
        ChromaDecimation {
            horizontal,
            vertical,
        }
    }
}

/// Ratio of a chroma dimension to the matching luma dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decimation {
    /// Chroma has no samples along this axis.
    Drop,
    /// Every second luma sample (floor).
    Half,
    /// Same resolution as luma.
    Full,
}

impl Decimation {
    /// Scale factor as a ratio (`0.0`, `0.5` or `1.0`).
    pub fn factor(self) -> f64 {
        match self {
            Self::Drop => 0.0,
            Self::Half => 0.5,
            Self::Full => 1.0,
        }
    }

    /// Map a luma extent or coordinate to chroma space.
    pub fn apply(self, n: u32) -> u32 {
        match self {
            Self::Drop => 0,
            Self::Half => n / 2,
            Self::Full => n,
        }
    }
}

/// Chroma decimation along both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChromaDecimation {
    /// Applied to widths and x coordinates.
    pub horizontal: Decimation,
    /// Applied to heights and y coordinates.
    pub vertical: Decimation,
}

/// Sample bit depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// One byte per sample.
    #[default]
    Eight,
    /// Two bytes per sample, value scaled by 4.
    Ten,
    /// Two bytes per sample, value scaled by 16.
    Twelve,
}

impl BitDepth {
    /// Resolve a bit count. Anything other than 10 or 12 behaves as 8-bit.
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            10 => Self::Ten,
            12 => Self::Twelve,
            _ => Self::Eight,
        }
    }

    /// Number of active bits.
    pub fn bits(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Ten => 10,
            Self::Twelve => 12,
        }
    }

    /// Bytes used to store one sample.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Ten | Self::Twelve => 2,
        }
    }

    /// Multiplier applied to an 8-bit value to place it in this depth.
    pub fn scale(self) -> u32 {
        match self {
            Self::Eight => 1,
            Self::Ten => 4,
            Self::Twelve => 16,
        }
    }

    /// Largest code representable at this depth.
    pub fn max_code(self) -> u32 {
        (1u32 << self.bits()) - 1
    }
}

/// Byte order of two-byte samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Low byte first.
    #[default]
    Little,
    /// High byte first.
    Big,
}

impl ByteOrder {
    /// Split a 16-bit sample into bytes in this order.
    pub fn serialize_sample(self, value: u16) -> [u8; 2] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }
}

/// One sample ready to be copied into a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedSample {
    bytes: [u8; 2],
    len: usize,
}

impl EncodedSample {
    /// The sample's bytes in plane order (one or two bytes).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Fill `dst` with repeated copies of this sample.
    ///
    /// `dst.len()` must be a multiple of the sample size; a trailing partial sample is left
    /// untouched.
    pub fn fill(&self, dst: &mut [u8]) {
        if self.len == 1 {
            dst.fill(self.bytes[0]);
        } else {
            for px in dst.chunks_exact_mut(2) {
                px.copy_from_slice(&self.bytes);
            }
        }
    }
}

/// Derived constants for one configured sample format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelLayout {
    /// Configured chroma subsampling.
    pub subsampling: Subsampling,
    /// Configured bit depth.
    pub bit_depth: BitDepth,
    /// Configured byte order (ignored for 8-bit samples).
    pub byte_order: ByteOrder,
    /// Cached `bit_depth.bytes_per_sample()`.
    pub bytes_per_sample: usize,
    /// Cached `bit_depth.scale()`.
    pub scale: u32,
    /// Cached `subsampling.decimation()`.
    pub chroma: ChromaDecimation,
}

impl PixelLayout {
    /// Resolve and cache the constants for a sample format.
    pub fn new(subsampling: Subsampling, bit_depth: BitDepth, byte_order: ByteOrder) -> Self {
        Self {
            subsampling,
            bit_depth,
            byte_order,
            bytes_per_sample: bit_depth.bytes_per_sample(),
            scale: bit_depth.scale(),
            chroma: subsampling.decimation(),
        }
    }

    /// Chroma plane dimensions for a luma plane of `width x height`.
    pub fn chroma_dims(&self, width: u32, height: u32) -> (u32, u32) {
        (
            self.chroma.horizontal.apply(width),
            self.chroma.vertical.apply(height),
        )
    }

    /// Scale an 8-bit value to the configured depth.
    ///
    /// The product saturates at the depth's maximum code; for 8-bit inputs this never triggers.
    pub fn scale_value(&self, value: u8) -> u16 {
        let scaled = (u32::from(value) * self.scale).min(self.bit_depth.max_code());
        scaled as u16
    }

    /// Scale and serialize an 8-bit value.
    pub fn encode(&self, value: u8) -> EncodedSample {
        if self.bytes_per_sample == 1 {
            EncodedSample {
                bytes: [value, 0],
                len: 1,
            }
        } else {
            EncodedSample {
                bytes: self.byte_order.serialize_sample(self.scale_value(value)),
                len: 2,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/pixel.rs"]
mod tests;
