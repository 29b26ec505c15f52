//! Sample formats and color conversion.

/// RGB to YCbCr conversion and the color-bar palette.
pub mod color;
/// Subsampling, bit depth and byte order resolution.
pub mod pixel;
