//! Wavelet denoising by soft thresholding of detail bands.
//!
//! # Algorithm Summary
//!
//! 1. Decompose the channel into `level` detail bands plus an approximation band
//! 2. Pick the threshold: `median(|finest detail|) / 0.6745` when adaptive,
//!    the configured value otherwise
//! 3. Shrink every detail coefficient toward zero by the threshold; the
//!    approximation band is left untouched
//! 4. Reconstruct

mod dwt;
mod error;
mod wavelet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use dwt::{Coefficients, decompose, max_level, reconstruct};
pub use error::{DecompositionError, DenoiseError};
pub use wavelet::Wavelet;

/// Rescales the median absolute deviation to a Gaussian standard deviation.
const MAD_SCALE: f64 = 0.6745;

/// Configuration for wavelet denoising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenoiseConfig {
    pub wavelet: Wavelet,
    /// Number of detail bands. Must be at least 1.
    pub level: usize,
    /// Derive the threshold from the finest detail band.
    pub adaptive: bool,
    /// Fixed threshold, used only when `adaptive` is false.
    pub threshold: Option<f64>,
}

impl Default for DenoiseConfig {
    fn default() -> Self {
        Self {
            wavelet: Wavelet::Sym4,
            level: 1,
            adaptive: true,
            threshold: None,
        }
    }
}

impl DenoiseConfig {
    #[must_use]
    pub const fn adaptive(wavelet: Wavelet, level: usize) -> Self {
        Self {
            wavelet,
            level,
            adaptive: true,
            threshold: None,
        }
    }

    #[must_use]
    pub const fn fixed(wavelet: Wavelet, level: usize, threshold: f64) -> Self {
        Self {
            wavelet,
            level,
            adaptive: false,
            threshold: Some(threshold),
        }
    }

    /// The fixed threshold, validated.
    fn fixed_threshold(&self) -> Result<f64, DenoiseError> {
        let threshold = self.threshold.ok_or(DenoiseError::MissingThreshold)?;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(DenoiseError::InvalidThreshold(threshold));
        }
        Ok(threshold)
    }
}

/// Noise scale estimate from a detail band.
///
/// Returns 0 for an empty band.
pub fn mad_threshold(band: &[f64]) -> f64 {
    let mut magnitudes: Vec<f64> = band.iter().map(|c| c.abs()).collect();
    median(&mut magnitudes) / MAD_SCALE
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Shrinks `value` toward zero by `threshold`, clamping at zero.
pub fn soft_threshold(value: f64, threshold: f64) -> f64 {
    value.signum() * (value.abs() - threshold).max(0.0)
}

/// Applies soft thresholding to every detail band.
pub fn threshold_details(coeffs: &mut Coefficients, threshold: f64) {
    for band in coeffs.details_mut() {
        for c in band.iter_mut() {
            *c = soft_threshold(*c, threshold);
        }
    }
}

/// Denoises one channel.
///
/// The result has the same length as `samples`.
pub fn denoise(samples: &[f64], config: &DenoiseConfig) -> Result<Vec<f64>, DenoiseError> {
    let fixed = if config.adaptive {
        None
    } else {
        Some(config.fixed_threshold()?)
    };

    let mut coeffs = decompose(samples, config.wavelet, config.level)?;
    let threshold = fixed.unwrap_or_else(|| mad_threshold(coeffs.finest_detail()));
    tracing::trace!(
        wavelet = %config.wavelet,
        level = config.level,
        threshold,
        "denoising channel"
    );

    threshold_details(&mut coeffs, threshold);
    Ok(reconstruct(&coeffs))
}

/// Denoises each channel independently, preserving channel order.
///
/// Returns the first failure if any channel cannot be decomposed.
pub fn denoise_channels(
    channels: &[Vec<f64>],
    config: &DenoiseConfig,
) -> Result<Vec<Vec<f64>>, DenoiseError> {
    tracing::debug!(
        channels = channels.len(),
        wavelet = %config.wavelet,
        level = config.level,
        adaptive = config.adaptive,
        "denoising channels"
    );
    channels
        .par_iter()
        .map(|channel| denoise(channel, config))
        .collect()
}
