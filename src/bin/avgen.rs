use std::io::{BufWriter, Write as _};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Context as _;
use avgen::audio::SAMPLE_RATE;
use avgen::{AudioChunk, AudioSink, BarColor, ByteOrder, Generator, GeneratorConfig, Subsampling};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Write a synthetic test signal to stdout as raw planar YUV frames.
#[derive(Parser, Debug)]
#[command(name = "avgen", version)]
struct Cli {
    /// Load the signal description from a JSON file. Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame width in pixels.
    #[arg(long, short = 'W')]
    width: Option<u32>,

    /// Frame height in pixels.
    #[arg(long, short = 'H')]
    height: Option<u32>,

    /// Frames per second.
    #[arg(long, short = 'f')]
    fps: Option<u32>,

    /// Chroma format: 400, 420, 422 or 444.
    #[arg(long, short = 'F')]
    format: Option<u32>,

    /// Bits per sample: 8, 10 or 12.
    #[arg(long, short = 'b')]
    bitdepth: Option<u8>,

    /// Store two-byte samples big endian.
    #[arg(long, short = 'B')]
    big_endian: bool,

    /// Fill the background with one color instead of the bars.
    #[arg(long, short = 'c')]
    onecolor: Option<BarColor>,

    /// Stop after this many frames.
    #[arg(long, short = 'n', default_value_t = 30)]
    max_frames: u64,

    /// Start the tone worker and pace video from the audio it delivers.
    #[arg(long)]
    audio: bool,

    /// Bip tone frequency in Hz.
    #[arg(long, default_value_t = 500)]
    bip: u32,

    /// Bop tone frequency in Hz.
    #[arg(long, default_value_t = 1500)]
    bop: u32,
}

impl Cli {
    fn generator_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut cfg = match &self.config {
            Some(path) => GeneratorConfig::from_path(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(width) = self.width {
            cfg.width = width;
        }
        if let Some(height) = self.height {
            cfg.height = height;
        }
        if let Some(fps) = self.fps {
            cfg.fps = fps;
        }
        if let Some(code) = self.format {
            cfg.subsampling = Subsampling::from_code(code);
        }
        if let Some(bits) = self.bitdepth {
            cfg.bit_depth = bits;
        }
        if self.big_endian {
            cfg.byte_order = ByteOrder::Big;
        }
        if self.onecolor.is_some() {
            cfg.one_color = self.onecolor;
        }
        if self.audio {
            cfg.bip_frequency = self.bip;
            cfg.bop_frequency = self.bop;
        }
        Ok(cfg)
    }
}

/// Counts delivered audio frames; the count is the video timebase.
struct AudioClock {
    frames: Arc<AtomicU64>,
}

impl AudioSink for AudioClock {
    fn push_chunk(&mut self, chunk: AudioChunk<'_>) {
        self.frames
            .fetch_add(u64::from(chunk.frames), Ordering::Release);
    }
}

fn audio_elapsed(frames: u64) -> Duration {
    Duration::from_nanos(frames * 1_000_000_000 / u64::from(SAMPLE_RATE))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = cli.generator_config()?;

    let audio_frames = Arc::new(AtomicU64::new(0));
    let mut generator = if cli.audio {
        Generator::initialize_with_audio(
            &cfg,
            AudioClock {
                frames: Arc::clone(&audio_frames),
            },
        )?
    } else {
        Generator::initialize(&cfg)?
    };

    let canvas = generator.canvas();
    let layout = *generator.layout();
    tracing::info!(
        width = canvas.width,
        height = canvas.height,
        fps = generator.fps().num,
        frame_interval_us = generator.frame_interval().as_micros() as u64,
        format = layout.subsampling.code(),
        bits = layout.bit_depth.bits(),
        frame_bytes = generator.len(),
        max_frames = cli.max_frames,
        audio = generator.has_audio(),
        "generating"
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let poll = avgen::chunk_delay() / 4;

    while generator.frame() < cli.max_frames {
        if generator.has_audio() {
            let elapsed = audio_elapsed(audio_frames.load(Ordering::Acquire));
            let goal = generator.fps().frames_in(elapsed);
            if generator.frame() > goal {
                std::thread::sleep(poll);
                continue;
            }
        }

        generator.produce_next_frame()?;
        out.write_all(generator.data())
            .context("write frame to stdout")?;
        tracing::debug!(frame = generator.frame(), flags = ?generator.tone_flags(), "frame written");
    }
    out.flush().context("flush stdout")?;

    let frames = generator.frame();
    generator.shutdown()?;
    tracing::info!(
        frames,
        audio_ms = audio_elapsed(audio_frames.load(Ordering::Acquire)).as_millis() as u64,
        "done"
    );
    Ok(())
}
