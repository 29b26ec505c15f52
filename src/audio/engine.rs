use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::audio::tone::{ToneFlags, ToneLoop};
use crate::audio::{CHANNELS, CHUNK_FRAMES, SAMPLE_RATE};
use crate::foundation::error::AvgenResult;
use crate::foundation::task::{SharedState, WorkerTask};

/// One chunk of interleaved signed 16-bit audio.
#[derive(Clone, Copy, Debug)]
pub struct AudioChunk<'a> {
    /// Interleaved samples, `frames * channels` long.
    pub samples: &'a [i16],
    /// Frames in this chunk.
    pub frames: u32,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
}

impl AudioChunk<'_> {
    /// Size of the chunk in bytes.
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.samples)
    }

    /// Samples serialized as little-endian bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }
}

/// Receiver of audio chunks, called from the worker thread.
///
/// The chunk borrows worker-owned memory and is only valid for the duration of the call.
pub trait AudioSink: Send + 'static {
    /// Consume one chunk.
    fn push_chunk(&mut self, chunk: AudioChunk<'_>);
}

impl<F> AudioSink for F
where
    F: FnMut(AudioChunk<'_>) + Send + 'static,
{
    fn push_chunk(&mut self, chunk: AudioChunk<'_>) {
        self(chunk)
    }
}

#[derive(Debug, Default)]
struct EngineState {
    flags: ToneFlags,
    must_stop: bool,
}

/// Time one chunk takes to play at [`SAMPLE_RATE`].
pub fn chunk_delay() -> Duration {
    Duration::from_nanos(u64::from(CHUNK_FRAMES) * 1_000_000_000 / u64::from(SAMPLE_RATE))
}

/// Running tone worker plus the flags it publishes.
#[derive(Debug)]
pub(crate) struct AudioEngine {
    shared: Arc<SharedState<EngineState>>,
    worker: Option<WorkerTask>,
}

impl AudioEngine {
    /// Prime the tone loop and start streaming it into `sink`.
    pub(crate) fn start(
        bip_frequency: u32,
        bop_frequency: u32,
        sink: Box<dyn AudioSink>,
    ) -> AvgenResult<Self> {
        Self::start_at(bip_frequency, bop_frequency, sink, 0)
    }

    /// Like [`AudioEngine::start`], with the first chunk read from `start_frame` of the loop.
    pub(crate) fn start_at(
        bip_frequency: u32,
        bop_frequency: u32,
        sink: Box<dyn AudioSink>,
        start_frame: usize,
    ) -> AvgenResult<Self> {
        let tone = ToneLoop::prime(bip_frequency, bop_frequency)?;
        tracing::debug!(
            bip_frequency,
            bop_frequency,
            loop_bytes = tone.byte_len(),
            start_frame,
            "tone loop primed"
        );

        let shared = Arc::new(SharedState::new(EngineState::default()));
        let worker_shared = Arc::clone(&shared);
        let worker = WorkerTask::spawn("avgen-audio", move || {
            run_worker(&tone, sink, &worker_shared, start_frame);
        })?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Current tone flags as last published by the worker.
    pub(crate) fn flags(&self) -> ToneFlags {
        self.shared.lock().flags
    }

    pub(crate) fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Ask the worker to stop and wait for it. Later calls are no-ops.
    pub(crate) fn stop(&mut self) -> AvgenResult<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        self.shared.update(|s| s.must_stop = true);
        worker.join()?;
        tracing::debug!("audio worker joined");
        Ok(())
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::warn!(error = %e, "audio worker did not exit cleanly");
        }
    }
}

fn run_worker(
    tone: &ToneLoop,
    mut sink: Box<dyn AudioSink>,
    shared: &SharedState<EngineState>,
    start_frame: usize,
) {
    let chunk_frames = CHUNK_FRAMES as usize;
    let delay = chunk_delay();
    let mut scratch = vec![0i16; chunk_frames * usize::from(CHANNELS)];
    let mut cursor = start_frame % tone.frames();
    let mut published = ToneFlags::default();
    let mut deadline = Instant::now();

    tracing::debug!(chunk_frames, delay_ns = delay.as_nanos() as u64, "audio worker started");
    loop {
        if shared.wait_until(deadline, |s| s.must_stop) {
            break;
        }
        let sent_at = Instant::now();

        let flags = tone.schedule().classify(cursor);
        let (samples, next) = tone.chunk_at(cursor, chunk_frames, &mut scratch);
        sink.push_chunk(AudioChunk {
            samples,
            frames: CHUNK_FRAMES,
            sample_rate: SAMPLE_RATE,
            channels: CHANNELS,
        });
        cursor = next;

        if flags != published {
            shared.update(|s| s.flags = flags);
            published = flags;
        }
        deadline = sent_at + delay;
    }
    tracing::debug!("audio worker stopping");
}

#[cfg(test)]
#[path = "../../tests/unit/audio/engine.rs"]
mod tests;
