//! Slicing a channel into labeled epochs.
//!
//! Times are seconds on the cropped recording's timeline, which starts at the
//! log anchor. A span `[tmin, tmax]` selects samples
//! `round(tmin * sfreq) ..= round(tmax * sfreq)`.

use std::ops::Range;

use thiserror::Error;

use crate::log_parser::FlagInterval;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EpochError {
    #[error("sampling rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("tmin must be non-negative, got {0} s")]
    NegativeStart(f64),

    #[error("tmin ({tmin} s) must not exceed tmax ({tmax} s)")]
    InvertedSpan { tmin: f64, tmax: f64 },

    /// A manual cut needs a span of positive length.
    #[error("tmin ({tmin} s) must be less than tmax ({tmax} s)")]
    EmptyCut { tmin: f64, tmax: f64 },

    #[error("tmax ({tmax} s) lies beyond the last sample at {available} s")]
    OutOfRange { tmax: f64, available: f64 },
}

/// A flag interval together with its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Epoch {
    pub interval: FlagInterval,
    /// Sample indices covered, half-open.
    pub range: Range<usize>,
    pub samples: Vec<f64>,
}

/// Sample indices covered by `[tmin, tmax]` on a channel of `n_samples`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sample_range(
    tmin: f64,
    tmax: f64,
    sfreq: f64,
    n_samples: usize,
) -> Result<Range<usize>, EpochError> {
    if !sfreq.is_finite() || sfreq <= 0.0 {
        return Err(EpochError::InvalidSampleRate(sfreq));
    }
    if tmin.is_nan() || tmin < 0.0 {
        return Err(EpochError::NegativeStart(tmin));
    }
    if tmax.is_nan() || tmin > tmax {
        return Err(EpochError::InvertedSpan { tmin, tmax });
    }

    let available = n_samples.saturating_sub(1) as f64 / sfreq;
    let last = (tmax * sfreq).round();
    if n_samples == 0 || last >= n_samples as f64 {
        return Err(EpochError::OutOfRange { tmax, available });
    }

    let first = (tmin * sfreq).round() as usize;
    Ok(first..last as usize + 1)
}

/// Cuts `[tmin, tmax]` out of a channel.
pub fn cut(samples: &[f64], sfreq: f64, tmin: f64, tmax: f64) -> Result<Vec<f64>, EpochError> {
    if tmin.is_nan() || tmax.is_nan() || tmin >= tmax {
        return Err(EpochError::EmptyCut { tmin, tmax });
    }
    let range = sample_range(tmin, tmax, sfreq, samples.len())?;
    Ok(samples[range].to_vec())
}

/// Slices one epoch per flag interval.
///
/// Fails on the first interval that does not fit the channel.
pub fn slice_epochs(
    samples: &[f64],
    sfreq: f64,
    intervals: &[FlagInterval],
) -> Result<Vec<Epoch>, EpochError> {
    intervals
        .iter()
        .map(|interval| {
            let range = sample_range(
                interval.start_offset_secs,
                interval.end_offset_secs,
                sfreq,
                samples.len(),
            )?;
            Ok(Epoch {
                interval: *interval,
                samples: samples[range.clone()].to_vec(),
                range,
            })
        })
        .collect()
}
