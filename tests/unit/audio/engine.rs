use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::audio::tone::ToneSchedule;

fn sink<F>(f: F) -> Box<dyn AudioSink>
where
    F: FnMut(AudioChunk<'_>) + Send + 'static,
{
    Box::new(f)
}

#[test]
fn chunk_delay_matches_chunk_duration() {
    assert_eq!(chunk_delay(), Duration::from_nanos(23_219_954));
}

#[test]
fn chunk_byte_len_counts_all_samples() {
    let samples = [1i16, -1, 2, -2];
    let chunk = AudioChunk {
        samples: &samples,
        frames: 2,
        sample_rate: SAMPLE_RATE,
        channels: CHANNELS,
    };
    assert_eq!(chunk.byte_len(), 8);
    assert_eq!(chunk.to_le_bytes(), vec![1, 0, 0xff, 0xff, 2, 0, 0xfe, 0xff]);
}

#[test]
fn first_chunk_arrives_immediately_and_stop_joins() {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let mut engine = AudioEngine::start(
        500,
        1500,
        sink(move |chunk| {
            assert_eq!(chunk.frames, CHUNK_FRAMES);
            assert_eq!(chunk.samples.len(), CHUNK_FRAMES as usize * 2);
            seen.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(2);
    while count.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(1));
    }
    assert!(count.load(Ordering::SeqCst) >= 1);
    assert!(engine.is_running());

    engine.stop().unwrap();
    assert!(!engine.is_running());
    let after = count.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(count.load(Ordering::SeqCst), after);

    engine.stop().unwrap();
}

#[test]
fn flags_start_clear() {
    let engine = AudioEngine::start(500, 1500, sink(|_| {})).unwrap();
    assert_eq!(engine.flags(), ToneFlags::default());
}

#[test]
fn missing_frequency_spawns_nothing() {
    let called = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&called);
    let err = AudioEngine::start(
        0,
        1500,
        sink(move |_| {
            *flag.lock().unwrap() = true;
        }),
    )
    .unwrap_err();
    assert!(matches!(err, crate::AvgenError::Configuration(_)));
    assert!(!*called.lock().unwrap());
}

#[test]
fn stop_latency_is_bounded_by_one_chunk() {
    let mut engine = AudioEngine::start(500, 1500, sink(|_| {})).unwrap();
    std::thread::sleep(Duration::from_millis(5));
    let started = Instant::now();
    engine.stop().unwrap();
    assert!(started.elapsed() < Duration::from_millis(500));
}

fn wait_for_flags(engine: &AudioEngine, want: impl Fn(ToneFlags) -> bool) -> bool {
    let until = Instant::now() + Duration::from_secs(2);
    while Instant::now() < until {
        if want(engine.flags()) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    false
}

fn assert_burst_toggles_flag(burst_start: usize, lit: fn(ToneFlags) -> bool) {
    let lead_in = 2 * CHUNK_FRAMES as usize;
    let mut engine =
        AudioEngine::start_at(500, 1500, sink(|_| {}), burst_start - lead_in).unwrap();

    assert!(wait_for_flags(&engine, lit), "flag never set");
    assert!(
        wait_for_flags(&engine, |f| f == ToneFlags::default()),
        "flag never cleared"
    );
    engine.stop().unwrap();
}

#[test]
fn bip_flag_sets_and_clears_around_the_burst() {
    let start = ToneSchedule::default().bip_frames().start;
    assert_burst_toggles_flag(start, |f| f.is_bip && !f.is_bop);
}

#[test]
fn bop_flag_sets_and_clears_around_the_burst() {
    let start = ToneSchedule::default().bop_frames().start;
    assert_burst_toggles_flag(start, |f| f.is_bop && !f.is_bip);
}

#[test]
fn start_position_selects_the_first_chunk() {
    let reference = ToneLoop::prime(500, 1500).unwrap();
    let at = reference.schedule().bip_frames().start;
    let first = Arc::new(Mutex::new(None::<Vec<i16>>));
    let slot = Arc::clone(&first);
    let mut engine = AudioEngine::start_at(
        500,
        1500,
        sink(move |chunk| {
            slot.lock().unwrap().get_or_insert_with(|| chunk.samples.to_vec());
        }),
        at,
    )
    .unwrap();

    let until = Instant::now() + Duration::from_secs(2);
    while first.lock().unwrap().is_none() && Instant::now() < until {
        std::thread::sleep(Duration::from_millis(1));
    }
    engine.stop().unwrap();

    let per_chunk = CHUNK_FRAMES as usize * 2;
    let got = first.lock().unwrap().take().unwrap();
    assert_eq!(got.as_slice(), &reference.samples()[at * 2..at * 2 + per_chunk]);
}
