//! avgen synthesizes a deterministic audio/video test signal.
//!
//! A [`Generator`] owns one contiguous Y/U/V frame buffer and redraws it on every
//! [`Generator::produce_next_frame`] call: color bars, a sweeping horizontal bar and an `MM:SS`
//! timestamp. With audio enabled, a background worker streams a 4-second stereo loop carrying two
//! reference tones into an [`AudioSink`], and the timestamp box lights up while each tone plays.
//!
//! - Describe the signal with a [`GeneratorConfig`]
//! - Create a [`Generator`] with [`Generator::initialize`] or [`Generator::initialize_with_audio`]
//! - Read the planes after each frame, then call [`Generator::shutdown`]
//!
//! Modules:
//!
//! - [`config`]: signal description and JSON loading
//! - [`format`]: subsampling, bit depth, byte order and RGB to YCbCr conversion
//! - [`render`]: plane storage, the digit font and the [`Generator`]
//! - [`audio`]: the tone loop and the worker that streams it
//! - [`convert`]: standalone repacking helpers for raw plane buffers
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod audio;
pub mod config;
pub mod convert;
pub mod format;
pub mod render;

pub use crate::foundation::core::{Canvas, Fps};
pub use crate::foundation::error::{AvgenError, AvgenResult};

pub use crate::audio::engine::{AudioChunk, AudioSink, chunk_delay};
pub use crate::audio::tone::{ToneFlags, ToneLoop, ToneSchedule};
pub use crate::config::GeneratorConfig;
pub use crate::convert::depth::{convert_8_to_16, convert_16_to_8};
pub use crate::convert::nv12::{
    I420Planes, Nv12Planes, convert_i420_to_nv12_10bit, convert_nv12_to_i420_10bit,
};
pub use crate::format::color::{BarColor, Rgb, Yuv};
pub use crate::format::pixel::{BitDepth, ByteOrder, PixelLayout, Subsampling};
pub use crate::render::generator::Generator;
pub use crate::render::planes::PlaneGeometry;
