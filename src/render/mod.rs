//! Frame drawing: plane storage, the digit font and the generator that ties them together.

/// Compiled-in digit atlas and text blitting.
pub mod font;
/// Frame-by-frame signal generator.
pub mod generator;
pub(crate) mod planes;
