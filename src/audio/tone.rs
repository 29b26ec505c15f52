use std::f64::consts::TAU;
use std::ops::Range;

use crate::audio::{
    BIP_MILLIS, BIP_OFFSET_SECS, BOP_MILLIS, BOP_OFFSET_SECS, BYTES_PER_FRAME, CHANNELS,
    LOOP_SECONDS, SAMPLE_RATE, TONE_AMPLITUDE,
};
use crate::foundation::error::{AvgenError, AvgenResult};

/// Which reference tone is audible at a position of the loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToneFlags {
    /// Inside the bip burst.
    pub is_bip: bool,
    /// Inside the bop burst.
    pub is_bop: bool,
}

/// Frame ranges of the two bursts within the loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToneSchedule {
    bip: Range<usize>,
    bop: Range<usize>,
}

impl Default for ToneSchedule {
    fn default() -> Self {
        Self {
            bip: burst_frames(BIP_OFFSET_SECS, BIP_MILLIS),
            bop: burst_frames(BOP_OFFSET_SECS, BOP_MILLIS),
        }
    }
}

fn burst_frames(offset_secs: u32, millis: u32) -> Range<usize> {
    let start = (offset_secs * SAMPLE_RATE) as usize;
    let len = (u64::from(millis) * u64::from(SAMPLE_RATE) / 1000) as usize;
    start..start + len
}

impl ToneSchedule {
    /// Bip burst as a frame range.
    pub fn bip_frames(&self) -> Range<usize> {
        self.bip.clone()
    }

    /// Bop burst as a frame range.
    pub fn bop_frames(&self) -> Range<usize> {
        self.bop.clone()
    }

    /// Bip burst as a byte range of the interleaved loop.
    pub fn bip_bytes(&self) -> Range<usize> {
        self.bip.start * BYTES_PER_FRAME..self.bip.end * BYTES_PER_FRAME
    }

    /// Bop burst as a byte range of the interleaved loop.
    pub fn bop_bytes(&self) -> Range<usize> {
        self.bop.start * BYTES_PER_FRAME..self.bop.end * BYTES_PER_FRAME
    }

    /// Classify a frame position.
    pub fn classify(&self, frame: usize) -> ToneFlags {
        ToneFlags {
            is_bip: self.bip.contains(&frame),
            is_bop: self.bop.contains(&frame),
        }
    }

    /// Classify a byte offset into the interleaved loop.
    pub fn classify_byte(&self, offset: usize) -> ToneFlags {
        self.classify(offset / BYTES_PER_FRAME)
    }
}

/// Interleaved signed 16-bit stereo loop with a bip and a bop burst in otherwise silence.
#[derive(Clone, Debug)]
pub struct ToneLoop {
    samples: Vec<i16>,
    schedule: ToneSchedule,
}

impl ToneLoop {
    /// Allocate and prime the loop.
    ///
    /// Both frequencies must be non-zero.
    pub fn prime(bip_frequency: u32, bop_frequency: u32) -> AvgenResult<Self> {
        if bip_frequency == 0 {
            return Err(AvgenError::configuration(
                "audio enabled but no bip_frequency set (use e.g. 500)",
            ));
        }
        if bop_frequency == 0 {
            return Err(AvgenError::configuration(
                "audio enabled but no bop_frequency set (use e.g. 1500)",
            ));
        }

        let len = (SAMPLE_RATE * LOOP_SECONDS) as usize * usize::from(CHANNELS);
        let mut samples = Vec::new();
        samples.try_reserve_exact(len).map_err(|e| {
            AvgenError::allocation(format!("failed to allocate {len} audio samples: {e}"))
        })?;
        samples.resize(len, 0);

        let schedule = ToneSchedule::default();
        write_burst(&mut samples, schedule.bip_frames(), bip_frequency);
        write_burst(&mut samples, schedule.bop_frames(), bop_frequency);
        Ok(Self { samples, schedule })
    }

    /// All interleaved samples of the loop.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Loop length in frames.
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(CHANNELS)
    }

    /// Loop length in bytes.
    pub fn byte_len(&self) -> usize {
        self.frames() * BYTES_PER_FRAME
    }

    /// Burst positions of this loop.
    pub fn schedule(&self) -> &ToneSchedule {
        &self.schedule
    }

    /// Borrow `frames` frames starting at frame `at`, wrapping past the loop end.
    ///
    /// A chunk that fits before the end is borrowed directly; otherwise it is assembled in
    /// `scratch` from two copies. Returns the chunk and the frame position following it.
    pub(crate) fn chunk_at<'a>(
        &'a self,
        at: usize,
        frames: usize,
        scratch: &'a mut [i16],
    ) -> (&'a [i16], usize) {
        let ch = usize::from(CHANNELS);
        let total = self.frames();
        let at = at % total;
        let frames = frames.min(total);
        let start = at * ch;
        let want = frames * ch;

        if start + want <= self.samples.len() {
            return (&self.samples[start..start + want], (at + frames) % total);
        }

        let tail = self.samples.len() - start;
        let head = want - tail;
        scratch[..tail].copy_from_slice(&self.samples[start..]);
        scratch[tail..want].copy_from_slice(&self.samples[..head]);
        (&scratch[..want], head / ch)
    }
}

fn write_burst(samples: &mut [i16], frames: Range<usize>, frequency: u32) {
    let ch = usize::from(CHANNELS);
    let w = TAU / f64::from(SAMPLE_RATE) * f64::from(frequency);
    for i in frames {
        // Phase follows the absolute frame index.
        let v = (TONE_AMPLITUDE * (w * i as f64).sin()) as i16;
        samples[i * ch..(i + 1) * ch].fill(v);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/tone.rs"]
mod tests;
