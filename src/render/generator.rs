use std::ops::Range;
use std::time::Duration;

use crate::audio::engine::{AudioEngine, AudioSink};
use crate::audio::tone::ToneFlags;
use crate::config::GeneratorConfig;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{AvgenError, AvgenResult};
use crate::format::color::{BarColor, Rgb};
use crate::format::pixel::PixelLayout;
use crate::render::font;
use crate::render::planes::{PlaneBuffer, PlaneGeometry};

/// Width of the timestamp box in pixels.
pub const TEXT_BOX_WIDTH: u32 = 170;
/// Height of the timestamp box in pixels.
pub const TEXT_BOX_HEIGHT: u32 = 100;
/// Inset of the timestamp text from the box corner.
pub const TEXT_MARGIN: u32 = 20;

const BIP_BOX: Rgb = Rgb::new(0, 0, 255);
const BOP_BOX: Rgb = Rgb::new(255, 0, 0);

/// Test-signal generator.
///
/// Owns the Y/U/V planes and, when audio is enabled, the tone worker. Each call to
/// [`Generator::produce_next_frame`] redraws the planes for the next frame:
///
/// - seven vertical color bars (or one flat color),
/// - a horizontal bar sweeping top to bottom every five seconds,
/// - a centered `MM:SS` box tinted blue during the bip and red during the bop.
#[derive(Debug)]
pub struct Generator {
    canvas: Canvas,
    fps: Fps,
    layout: PixelLayout,
    one_color: Option<BarColor>,
    planes: PlaneBuffer,
    frame: u64,
    perc: f64,
    step: f64,
    audio: Option<AudioEngine>,
}

impl Generator {
    /// Create a video-only generator.
    pub fn initialize(config: &GeneratorConfig) -> AvgenResult<Self> {
        Self::init(config, None)
    }

    /// Create a generator whose tone worker streams audio into `sink`.
    ///
    /// `bip_frequency` and `bop_frequency` must both be set. The first chunk is delivered as
    /// soon as the worker starts.
    pub fn initialize_with_audio(
        config: &GeneratorConfig,
        sink: impl AudioSink,
    ) -> AvgenResult<Self> {
        Self::init(config, Some(Box::new(sink)))
    }

    #[tracing::instrument(skip_all, fields(width = config.width, height = config.height))]
    fn init(config: &GeneratorConfig, sink: Option<Box<dyn AudioSink>>) -> AvgenResult<Self> {
        let resolved = config.resolved();
        let canvas = resolved.canvas();
        let fps = resolved.frame_rate()?;
        let layout = resolved.layout();
        let planes = PlaneBuffer::allocate(canvas, &layout)?;
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            fps = fps.num,
            subsampling = layout.subsampling.code(),
            bits = layout.bit_depth.bits(),
            y_len = planes.y_len(),
            c_len = planes.c_len(),
            "planes allocated"
        );

        let audio = match sink {
            Some(sink) => Some(AudioEngine::start(
                resolved.bip_frequency,
                resolved.bop_frequency,
                sink,
            )?),
            None => None,
        };

        Ok(Self {
            canvas,
            fps,
            layout,
            one_color: resolved.one_color,
            planes,
            frame: 0,
            perc: 0.0,
            step: 1.0 / (5.0 * fps.as_f64()),
            audio,
        })
    }

    /// Draw the next frame into the planes and advance the frame counter.
    ///
    /// On error the planes and counters are left as they were.
    pub fn produce_next_frame(&mut self) -> AvgenResult<()> {
        let span = bar_span(self.canvas.height, self.perc).inspect_err(|e| {
            tracing::error!(frame = self.frame, perc = self.perc, error = %e, "bar out of bounds");
        })?;

        let mut next = self.perc + self.step;
        if next >= 1.0 {
            next = 0.0;
        }

        // Rows come from the current position, the color from the advanced one.
        self.planes.clear();
        self.draw_background();
        self.planes
            .fill_rows(&self.layout, span, bar_color(next).to_yuv());
        self.draw_text_box();

        self.perc = next;
        self.frame += 1;
        Ok(())
    }

    /// Stop the audio worker, if any, and release the planes.
    pub fn shutdown(mut self) -> AvgenResult<()> {
        if let Some(mut audio) = self.audio.take() {
            audio.stop()?;
        }
        Ok(())
    }

    fn draw_background(&mut self) {
        let height = self.canvas.height;
        if let Some(color) = self.one_color {
            let width = self.canvas.width;
            self.planes
                .fill_rect(&self.layout, 0..width, 0..height, color.rgb().to_yuv());
            return;
        }

        let bar_w = self.canvas.width / BarColor::ALL.len() as u32;
        for (i, color) in BarColor::ALL.into_iter().enumerate() {
            let x = i as u32 * bar_w;
            self.planes
                .fill_rect(&self.layout, x..x + bar_w, 0..height, color.rgb().to_yuv());
        }
    }

    fn draw_text_box(&mut self) {
        let Canvas { width, height } = self.canvas;
        if width <= TEXT_BOX_WIDTH || height <= TEXT_BOX_HEIGHT {
            return;
        }
        let x = width / 2 - TEXT_BOX_WIDTH / 2;
        let y = height / 2 - TEXT_BOX_HEIGHT / 2;

        let flags = self.tone_flags();
        let fill = if flags.is_bop {
            BOP_BOX
        } else if flags.is_bip {
            BIP_BOX
        } else {
            Rgb::BLACK
        };
        self.planes.fill_rect(
            &self.layout,
            x..x + TEXT_BOX_WIDTH,
            y..y + TEXT_BOX_HEIGHT,
            fill.to_yuv(),
        );

        let text = timestamp(self.fps, self.frame);
        let geom = self.planes.luma_geometry();
        font::draw_text(
            self.planes.y_mut(),
            geom,
            &self.layout,
            &text,
            x + TEXT_MARGIN,
            y + TEXT_MARGIN,
        );
    }

    /// Number of frames produced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Position of the moving bar, in `[0, 1)`.
    pub fn perc(&self) -> f64 {
        self.perc
    }

    /// Luma plane.
    pub fn y(&self) -> &[u8] {
        self.planes.y()
    }

    /// Cb plane.
    pub fn u(&self) -> &[u8] {
        self.planes.u()
    }

    /// Cr plane.
    pub fn v(&self) -> &[u8] {
        self.planes.v()
    }

    /// All three planes back to back, Y then U then V.
    pub fn data(&self) -> &[u8] {
        self.planes.data()
    }

    /// Luma plane size in bytes.
    pub fn y_len(&self) -> usize {
        self.planes.y_len()
    }

    /// Cb plane size in bytes.
    pub fn u_len(&self) -> usize {
        self.planes.c_len()
    }

    /// Cr plane size in bytes.
    pub fn v_len(&self) -> usize {
        self.planes.c_len()
    }

    /// Size of one whole frame in bytes.
    pub fn len(&self) -> usize {
        self.planes.data().len()
    }

    /// `true` only for a zero-sized frame, which initialization never produces.
    pub fn is_empty(&self) -> bool {
        self.planes.data().is_empty()
    }

    /// Dimensions of the chroma planes, in samples.
    pub fn chroma_geometry(&self) -> PlaneGeometry {
        self.planes.chroma_geometry()
    }

    /// Resolved pixel layout.
    pub fn layout(&self) -> &PixelLayout {
        &self.layout
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Duration of one frame.
    pub fn frame_interval(&self) -> Duration {
        self.fps.frame_interval()
    }

    /// Tone flags last published by the audio worker; all clear without audio.
    pub fn tone_flags(&self) -> ToneFlags {
        self.audio
            .as_ref()
            .map(AudioEngine::flags)
            .unwrap_or_default()
    }

    /// Whether a tone worker is running.
    pub fn has_audio(&self) -> bool {
        self.audio.as_ref().is_some_and(AudioEngine::is_running)
    }
}

/// Rows covered by the moving bar at position `perc`, clamped to `0..height`.
///
/// Fails when the clamped range is still not inside the plane, which only happens for `perc`
/// outside `[0, 1)`.
pub fn bar_span(height: u32, perc: f64) -> AvgenResult<Range<u32>> {
    let h = i64::from(height);
    let bar_h = h / 5;
    let top = -bar_h + (perc * (h + bar_h) as f64) as i64;
    let start = top.max(0);
    let end = (top + bar_h).min(h);
    if start > end || start > h {
        return Err(AvgenError::invariant(format!(
            "bar rows {top}..{} outside 0..{height}",
            top + bar_h
        )));
    }
    Ok(start as u32..end as u32)
}

/// Moving-bar color at position `perc`.
pub fn bar_color(perc: f64) -> Rgb {
    Rgb::new(
        255u8.saturating_sub((perc * 255.0) as u8),
        30u8.saturating_add((perc * 235.0) as u8),
        150u8.saturating_add((perc * 205.0) as u8),
    )
}

/// `MM:SS` label for `frame` at `fps`. Minutes wrap every hour.
pub fn timestamp(fps: Fps, frame: u64) -> String {
    let secs = fps.frames_to_whole_secs(frame);
    format!("{:02}:{:02}", (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
#[path = "../../tests/unit/render/generator.rs"]
mod tests;
