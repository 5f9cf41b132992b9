use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use crate::constants::audio;

/// One binaural loop: a slightly different frequency per stereo channel,
/// the difference is the perceived beat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSpec {
    pub name: &'static str,
    pub left_hz: f64,
    pub right_hz: f64,
}

/// The four shipped loops, one per brainwave band.
pub const TRACKS: [TrackSpec; 4] = [
    TrackSpec { name: "1_binaural_sleep_delta", left_hz: 60.0, right_hz: 63.0 },
    TrackSpec { name: "2_binaural_meditation_theta", left_hz: 70.0, right_hz: 76.0 },
    TrackSpec { name: "3_binaural_relax_alpha", left_hz: 80.0, right_hz: 90.0 },
    TrackSpec { name: "4_binaural_focus_beta", left_hz: 90.0, right_hz: 105.0 },
];

/// Quantize a [-1.0, 1.0] sample to signed 16-bit.
///
/// The cast truncates toward zero rather than rounding, matching the
/// files the app already ships.
fn quantize(value: f64) -> i16 {
    (value * 32767.0) as i16
}

/// Sine sample for one channel at the given frame index.
fn sine_sample(frequency_hz: f64, frame: u64, sample_rate: u32) -> i16 {
    let t = frame as f64 / sample_rate as f64;
    quantize(audio::AMPLITUDE * (2.0 * PI * frequency_hz * t).sin())
}

/// Write one track as 16-bit stereo PCM, streaming frame by frame.
///
/// Duration and sample rate are parameters so tests can write short
/// files; production runs pass the fixed loop constants.
pub fn write_track(
    track: &TrackSpec,
    out_dir: &Path,
    duration_secs: u32,
    sample_rate: u32,
) -> Result<PathBuf> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let path = out_dir.join(format!("{}.wav", track.name));
    let mut writer = WavWriter::create(&path, spec)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let frames = duration_secs as u64 * sample_rate as u64;
    for frame in 0..frames {
        writer
            .write_sample(sine_sample(track.left_hz, frame, sample_rate))
            .with_context(|| format!("Failed to write samples to {}", path.display()))?;
        writer
            .write_sample(sine_sample(track.right_hz, frame, sample_rate))
            .with_context(|| format!("Failed to write samples to {}", path.display()))?;
    }

    writer
        .finalize()
        .with_context(|| format!("Failed to finalize {}", path.display()))?;

    Ok(path)
}

/// Run the full audio pipeline, writing every track into `out_dir`.
pub fn run(out_dir: &Path) -> Result<()> {
    println!(
        "Generating {} binaural loops ({}s at {} Hz)...",
        TRACKS.len(),
        audio::DURATION_SECS,
        audio::SAMPLE_RATE
    );

    for track in &TRACKS {
        let path = write_track(track, out_dir, audio::DURATION_SECS, audio::SAMPLE_RATE)?;
        println!(
            "✓ {} ({} Hz left / {} Hz right)",
            path.display(),
            track.left_hz,
            track.right_hz
        );
    }

    println!("Done. Loops are seamless and ready to bundle.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_table() {
        assert_eq!(TRACKS.len(), 4);
        assert_eq!(TRACKS[0].name, "1_binaural_sleep_delta");
        assert_eq!((TRACKS[0].left_hz, TRACKS[0].right_hz), (60.0, 63.0));
        assert_eq!(TRACKS[3].name, "4_binaural_focus_beta");
        assert_eq!((TRACKS[3].left_hz, TRACKS[3].right_hz), (90.0, 105.0));

        // Right channel always sits above the left: positive beat frequency
        for track in &TRACKS {
            assert!(track.right_hz > track.left_hz);
        }
    }

    #[test]
    fn test_loop_constants() {
        assert_eq!(audio::SAMPLE_RATE, 44_100);
        assert_eq!(audio::DURATION_SECS, 900);
        assert_eq!(
            audio::DURATION_SECS as u64 * audio::SAMPLE_RATE as u64,
            39_690_000
        );
    }

    #[test]
    fn test_quantize_truncates_toward_zero() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32767);
        // Truncation, not rounding
        assert_eq!(quantize(0.99999), 32766);
        assert_eq!(quantize(-0.99999), -32766);
    }

    #[test]
    fn test_sine_sample_phase_and_bounds() {
        // Phase starts at zero
        assert_eq!(sine_sample(60.0, 0, 44_100), 0);

        // Quarter period of a 60 Hz wave peaks at half scale
        let quarter = 44_100 / (60 * 4);
        let peak = sine_sample(60.0, quarter as u64, 44_100);
        assert!((peak - 16383).abs() <= 200, "peak was {}", peak);

        // One full second of samples stays inside half scale
        for frame in 0..44_100u64 {
            let s = sine_sample(63.0, frame, 44_100);
            assert!(s >= -16384 && s <= 16384);
        }
    }
}
