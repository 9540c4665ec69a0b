//! Multi-level discrete wavelet transform with periodized filters.
//!
//! Each stage splits its input into half-length approximation and detail
//! bands. An odd-length stage is extended by repeating its last sample, and
//! reconstruction trims every stage back to its recorded length, so the
//! inverse returns exactly as many samples as were decomposed.

use super::error::DecompositionError;
use super::wavelet::Wavelet;

/// Deepest level a signal of `len` samples supports for `wavelet`.
///
/// The largest `J` with `(filter_len - 1) * 2^J <= len`, or 0 when even one
/// level does not fit.
pub fn max_level(len: usize, wavelet: Wavelet) -> usize {
    let base = wavelet.filter_len() - 1;
    let mut span = base;
    let mut level = 0;
    while span * 2 <= len {
        span *= 2;
        level += 1;
    }
    level
}

/// Wavelet bands of a decomposed signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    approximation: Vec<f64>,
    /// Finest band first.
    details: Vec<Vec<f64>>,
    /// Input length of each stage, finest first.
    stage_lens: Vec<usize>,
    wavelet: Wavelet,
}

impl Coefficients {
    /// Returns the number of decomposition levels.
    pub fn levels(&self) -> usize {
        self.details.len()
    }

    /// Returns the coarsest (approximation) band.
    pub fn approximation(&self) -> &[f64] {
        &self.approximation
    }

    /// Returns the detail band at `level` (1 is the finest).
    ///
    /// Returns `None` if the level is out of range.
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        level
            .checked_sub(1)
            .and_then(|i| self.details.get(i))
            .map(Vec::as_slice)
    }

    /// Returns the finest detail band.
    pub fn finest_detail(&self) -> &[f64] {
        self.details.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Mutable access to every detail band, finest first.
    pub fn details_mut(&mut self) -> impl Iterator<Item = &mut [f64]> {
        self.details.iter_mut().map(Vec::as_mut_slice)
    }
}

/// Decomposes `samples` into `level` detail bands and one approximation band.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DecompositionError::EmptySignal`] | `samples` is empty |
/// | [`DecompositionError::NonFiniteData`] | any sample is NaN or infinite |
/// | [`DecompositionError::ZeroLevel`] | `level == 0` |
/// | [`DecompositionError::LevelTooDeep`] | `level` exceeds [`max_level`] |
pub fn decompose(
    samples: &[f64],
    wavelet: Wavelet,
    level: usize,
) -> Result<Coefficients, DecompositionError> {
    if samples.is_empty() {
        return Err(DecompositionError::EmptySignal);
    }
    if samples.iter().any(|x| !x.is_finite()) {
        return Err(DecompositionError::NonFiniteData);
    }
    if level == 0 {
        return Err(DecompositionError::ZeroLevel);
    }
    let max = max_level(samples.len(), wavelet);
    if level > max {
        return Err(DecompositionError::LevelTooDeep {
            requested: level,
            max,
            len: samples.len(),
        });
    }

    let lo = wavelet.scaling_filter();
    let hi = wavelet.wavelet_filter();

    let mut approximation = samples.to_vec();
    let mut details = Vec::with_capacity(level);
    let mut stage_lens = Vec::with_capacity(level);

    for _ in 0..level {
        stage_lens.push(approximation.len());
        let (next, detail) = analyze(&approximation, lo, &hi);
        details.push(detail);
        approximation = next;
    }

    Ok(Coefficients {
        approximation,
        details,
        stage_lens,
        wavelet,
    })
}

/// Inverts [`decompose`].
pub fn reconstruct(coeffs: &Coefficients) -> Vec<f64> {
    let lo = coeffs.wavelet.scaling_filter();
    let hi = coeffs.wavelet.wavelet_filter();

    let mut signal = coeffs.approximation.clone();
    for (detail, &len) in coeffs.details.iter().zip(&coeffs.stage_lens).rev() {
        signal = synthesize(&signal, detail, lo, &hi, len);
    }
    signal
}

/// One analysis stage: circular correlation with both filters, downsampled by two.
fn analyze(signal: &[f64], lo: &[f64], hi: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let last = signal.len() - 1;
    let n = signal.len() + signal.len() % 2;
    let half = n / 2;

    let mut approx = vec![0.0; half];
    let mut detail = vec![0.0; half];
    for k in 0..half {
        for (j, (&l, &h)) in lo.iter().zip(hi).enumerate() {
            let x = signal[((2 * k + j) % n).min(last)];
            approx[k] += l * x;
            detail[k] += h * x;
        }
    }
    (approx, detail)
}

/// One synthesis stage, the transpose of [`analyze`], trimmed to `len`.
fn synthesize(approx: &[f64], detail: &[f64], lo: &[f64], hi: &[f64], len: usize) -> Vec<f64> {
    let n = approx.len() * 2;
    let mut out = vec![0.0; n];
    for (k, (&a, &d)) in approx.iter().zip(detail).enumerate() {
        for (j, (&l, &h)) in lo.iter().zip(hi).enumerate() {
            out[(2 * k + j) % n] += l * a + h * d;
        }
    }
    out.truncate(len);
    out
}
