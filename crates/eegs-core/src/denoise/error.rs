//! Error types for wavelet denoising.

/// Failure to decompose a signal into wavelet bands.
///
/// Kept separate from configuration errors so callers can retry with a
/// lower level instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecompositionError {
    /// Returned when the input signal has no samples.
    #[error("signal is empty")]
    EmptySignal,

    /// Returned when the input contains NaN or infinity.
    #[error("signal contains non-finite values")]
    NonFiniteData,

    /// Returned when zero decomposition levels are requested.
    #[error("decomposition level must be at least 1")]
    ZeroLevel,

    /// Returned when the requested level exceeds what the signal length supports.
    #[error("level too deep: requested {requested}, max for length {len} is {max}")]
    LevelTooDeep {
        /// Level that was requested.
        requested: usize,
        /// Maximum feasible level.
        max: usize,
        /// Length of the input signal.
        len: usize,
    },
}

/// Error type for all fallible denoising operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DenoiseError {
    #[error(transparent)]
    Decomposition(#[from] DecompositionError),

    /// Returned when a wavelet name is not recognised.
    #[error("unsupported wavelet: {0}")]
    UnknownWavelet(String),

    /// Returned when adaptive thresholding is off and no threshold was given.
    #[error("a fixed threshold is required when adaptive thresholding is disabled")]
    MissingThreshold,

    /// Returned when the fixed threshold is negative or non-finite.
    #[error("threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),
}
