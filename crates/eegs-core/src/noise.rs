//! Detection of sustained high-amplitude segments across channels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NoiseError {
    #[error("sampling rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("minimum duration {min_duration} s is shorter than one sample at {sfreq} Hz")]
    MinDurationTooShort { min_duration: f64, sfreq: f64 },

    #[error("channel {channel} has {len} samples, expected {expected}")]
    RaggedChannels {
        channel: usize,
        len: usize,
        expected: usize,
    },
}

/// A span flagged as noise, in seconds from the start of the recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoisySegment {
    pub onset_secs: f64,
    pub duration_secs: f64,
}

/// Finds spans where any channel exceeds `threshold` for at least
/// `min_duration` seconds.
///
/// The per-sample mask is smoothed with a centred box of `min_duration`
/// samples and kept only where the whole box is noisy. Onsets are reported at
/// the last clean sample before a run, offsets at the last noisy sample.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn detect_noisy_segments(
    channels: &[Vec<f64>],
    sfreq: f64,
    threshold: f64,
    min_duration: f64,
) -> Result<Vec<NoisySegment>, NoiseError> {
    if !sfreq.is_finite() || sfreq <= 0.0 {
        return Err(NoiseError::InvalidSampleRate(sfreq));
    }
    let window = (min_duration * sfreq).trunc();
    if window.is_nan() || window < 1.0 {
        return Err(NoiseError::MinDurationTooShort {
            min_duration,
            sfreq,
        });
    }
    let window = window as usize;

    let Some(first) = channels.first() else {
        return Ok(Vec::new());
    };
    let n = first.len();
    if let Some((channel, ch)) = channels.iter().enumerate().find(|(_, ch)| ch.len() != n) {
        return Err(NoiseError::RaggedChannels {
            channel,
            len: ch.len(),
            expected: n,
        });
    }

    let mask: Vec<bool> = (0..n)
        .map(|t| channels.iter().any(|ch| ch[t].abs() > threshold))
        .collect();
    let sustained = sustained_mask(&mask, window);

    let segments: Vec<NoisySegment> = runs(&sustained)
        .into_iter()
        .map(|(start, end)| {
            let onset = start.saturating_sub(1);
            NoisySegment {
                onset_secs: onset as f64 / sfreq,
                duration_secs: (end - onset) as f64 / sfreq,
            }
        })
        .collect();

    tracing::debug!(
        samples = n,
        channels = channels.len(),
        window,
        segments = segments.len(),
        "scanned for noisy segments"
    );
    Ok(segments)
}

/// Marks samples whose centred `window`-sample neighbourhood is entirely noisy.
fn sustained_mask(mask: &[bool], window: usize) -> Vec<bool> {
    let n = mask.len();
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0usize);
    for &noisy in mask {
        prefix.push(prefix[prefix.len() - 1] + usize::from(noisy));
    }

    let lead = (window - 1) / 2;
    (0..n)
        .map(|k| {
            let hi = (k + lead + 1).min(n);
            let lo = (k + lead + 1).saturating_sub(window).min(hi);
            prefix[hi] - prefix[lo] >= window
        })
        .collect()
}

/// Inclusive `(start, end)` index pairs of each run of `true`.
fn runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, &on) in mask.iter().enumerate() {
        match (on, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, mask.len() - 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const UV: f64 = 1e-6;

    fn quiet(n: usize) -> Vec<f64> {
        vec![5.0 * UV; n]
    }

    fn assert_segment(segment: &NoisySegment, onset: f64, duration: f64) {
        assert!(
            (segment.onset_secs - onset).abs() < 1e-9
                && (segment.duration_secs - duration).abs() < 1e-9,
            "expected onset {onset} duration {duration}, got {segment:?}"
        );
    }

    #[test]
    fn test_sustained_burst_is_detected() {
        let mut ch0 = quiet(50);
        for sample in &mut ch0[10..30] {
            *sample = 200.0 * UV;
        }
        let channels = vec![ch0, quiet(50)];

        let segments = detect_noisy_segments(&channels, 10.0, 100.0 * UV, 0.5).unwrap();

        // five-sample box keeps 12..=27; onset reported one sample earlier
        assert_eq!(segments.len(), 1);
        assert_segment(&segments[0], 1.1, 1.6);
    }

    #[test]
    fn test_short_burst_is_ignored() {
        let mut ch0 = quiet(50);
        for sample in &mut ch0[40..43] {
            *sample = -300.0 * UV;
        }

        let segments = detect_noisy_segments(&[ch0], 10.0, 100.0 * UV, 0.5).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_any_channel_triggers() {
        let mut ch0 = quiet(40);
        let mut ch1 = quiet(40);
        ch0[5..8].fill(150.0 * UV);
        ch1[20..22].fill(-150.0 * UV);

        let segments = detect_noisy_segments(&[ch0, ch1], 10.0, 100.0 * UV, 0.1).unwrap();

        assert_eq!(segments.len(), 2);
        assert_segment(&segments[0], 0.4, 0.3);
        assert_segment(&segments[1], 1.9, 0.2);
    }

    #[test]
    fn test_runs_touching_the_edges() {
        let mut ch0 = quiet(20);
        ch0[..3].fill(500.0 * UV);
        ch0[18..].fill(500.0 * UV);

        let segments = detect_noisy_segments(&[ch0], 10.0, 100.0 * UV, 0.1).unwrap();

        assert_eq!(segments.len(), 2);
        assert_segment(&segments[0], 0.0, 0.2);
        assert_segment(&segments[1], 1.7, 0.2);
    }

    #[test]
    fn test_no_channels() {
        let segments = detect_noisy_segments(&[], 10.0, 1.0, 1.0).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        let channels = vec![quiet(10)];
        assert_eq!(
            detect_noisy_segments(&channels, 0.0, 1.0, 1.0),
            Err(NoiseError::InvalidSampleRate(0.0))
        );
        assert_eq!(
            detect_noisy_segments(&channels, 10.0, 1.0, 0.05),
            Err(NoiseError::MinDurationTooShort {
                min_duration: 0.05,
                sfreq: 10.0
            })
        );
        assert_eq!(
            detect_noisy_segments(&[quiet(10), quiet(9)], 10.0, 1.0, 1.0),
            Err(NoiseError::RaggedChannels {
                channel: 1,
                len: 9,
                expected: 10
            })
        );
    }

    #[test]
    fn test_sustained_mask_window_one_is_identity() {
        let mask = [false, true, true, false, true];
        assert_eq!(sustained_mask(&mask, 1), mask.to_vec());
    }

    #[test]
    fn test_runs() {
        assert_eq!(
            runs(&[true, true, false, false, true, false, true]),
            vec![(0, 1), (4, 4), (6, 6)]
        );
        assert!(runs(&[false, false]).is_empty());
    }
}
