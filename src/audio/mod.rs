//! Reference-tone audio: a primed 4-second stereo loop and the worker that streams it.

/// Background worker that hands fixed-size chunks to an [`engine::AudioSink`].
pub mod engine;
/// Tone loop priming and bip/bop scheduling.
pub mod tone;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;
/// Interleaved output channels.
pub const CHANNELS: u16 = 2;
/// Bytes per interleaved frame (`CHANNELS` signed 16-bit samples).
pub const BYTES_PER_FRAME: usize = CHANNELS as usize * std::mem::size_of::<i16>();
/// Length of the tone loop in seconds.
pub const LOOP_SECONDS: u32 = 4;
/// Frames delivered per chunk.
pub const CHUNK_FRAMES: u32 = 1024;
/// Peak amplitude of a tone burst.
pub const TONE_AMPLITUDE: f64 = 10_000.0;
/// Offset of the bip burst from the loop start, in seconds.
pub const BIP_OFFSET_SECS: u32 = 1;
/// Offset of the bop burst from the loop start, in seconds.
pub const BOP_OFFSET_SECS: u32 = 3;
/// Duration of the bip burst in milliseconds.
pub const BIP_MILLIS: u32 = 100;
/// Duration of the bop burst in milliseconds.
pub const BOP_MILLIS: u32 = 100;
