use std::time::Duration;

use crate::foundation::error::{AvgenError, AvgenResult};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> AvgenResult<Self> {
        if den == 0 {
            return Err(AvgenError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(AvgenError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame.
    pub fn frame_interval(self) -> Duration {
        let nanos = 1_000_000_000u128 * u128::from(self.den) / u128::from(self.num);
        Duration::from_nanos(nanos as u64)
    }

    /// Whole seconds elapsed after `frames` frames (floor semantics).
    pub fn frames_to_whole_secs(self, frames: u64) -> u64 {
        let secs = u128::from(frames) * u128::from(self.den) / u128::from(self.num);
        secs as u64
    }

    /// Number of frames whose start time lies at or before `elapsed`.
    pub fn frames_in(self, elapsed: Duration) -> u64 {
        let num = elapsed.as_nanos() * u128::from(self.num);
        let den = 1_000_000_000u128 * u128::from(self.den);
        (num / den) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Number of luma samples, or `None` when it does not fit in `usize`.
    pub fn pixel_count(self) -> Option<usize> {
        usize::try_from(self.width)
            .ok()?
            .checked_mul(usize::try_from(self.height).ok()?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
