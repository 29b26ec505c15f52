//! Generator configuration.
//!
//! [`GeneratorConfig`] is the serde-facing description of a signal. Zero fields are placeholders
//! for defaults and are resolved by [`GeneratorConfig::resolved`] when a generator is
//! initialized, so a partial JSON document such as `{"width": 320}` is a valid config.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{AvgenError, AvgenResult};
use crate::format::color::BarColor;
use crate::format::pixel::{BitDepth, ByteOrder, PixelLayout, Subsampling};

/// Width used when `width` is zero.
pub const DEFAULT_WIDTH: u32 = 640;
/// Height used when `height` is zero.
pub const DEFAULT_HEIGHT: u32 = 480;
/// Frame rate used when `fps` is zero.
pub const DEFAULT_FPS: u32 = 3;
/// Bit depth used when `bit_depth` is zero.
pub const DEFAULT_BIT_DEPTH: u8 = 8;

/// Description of the video signal and the audio tones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Chroma subsampling mode.
    pub subsampling: Subsampling,
    /// Bits per sample: 8, 10 or 12.
    pub bit_depth: u8,
    /// Byte order of two-byte samples.
    pub byte_order: ByteOrder,
    /// Fill the background with one palette color instead of the bars.
    pub one_color: Option<BarColor>,
    /// Bip tone frequency in Hz. Required when audio is enabled.
    pub bip_frequency: u32,
    /// Bop tone frequency in Hz. Required when audio is enabled.
    pub bop_frequency: u32,
}

impl GeneratorConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> AvgenResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AvgenError::configuration(format!("parse generator config JSON: {e}")))
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> AvgenResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| AvgenError::configuration(format!("parse generator config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AvgenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AvgenError::configuration(format!("open generator config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Copy of this config with every zero field replaced by its default.
    pub fn resolved(&self) -> Self {
        let mut out = self.clone();
        if out.width == 0 {
            out.width = DEFAULT_WIDTH;
        }
        if out.height == 0 {
            out.height = DEFAULT_HEIGHT;
        }
        if out.fps == 0 {
            out.fps = DEFAULT_FPS;
        }
        if out.bit_depth == 0 {
            out.bit_depth = DEFAULT_BIT_DEPTH;
        }
        out
    }

    /// Canvas of the resolved config.
    pub fn canvas(&self) -> Canvas {
        let r = self.resolved();
        Canvas {
            width: r.width,
            height: r.height,
        }
    }

    /// Frame rate of the resolved config.
    pub fn frame_rate(&self) -> AvgenResult<Fps> {
        Fps::new(self.resolved().fps, 1)
    }

    /// Pixel layout of the resolved config.
    ///
    /// An unsupported bit depth is logged and treated as 8-bit.
    pub fn layout(&self) -> PixelLayout {
        let bits = self.resolved().bit_depth;
        let depth = BitDepth::from_bits(bits);
        if depth.bits() != bits {
            tracing::warn!(bit_depth = bits, "unsupported bit depth, using 8-bit samples");
        }
        PixelLayout::new(self.subsampling, depth, self.byte_order)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
