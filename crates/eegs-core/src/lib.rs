//! Core alignment logic for EEG sessions.
//!
//! This crate contains the fundamental types and logic for:
//! - Log parsing: turning keystroke log lines into labeled flag intervals
//! - Clock synchronization: aligning the device recording with the log timeline
//! - Wavelet denoising: per-channel soft-threshold cleaning
//! - Epoching and noise detection over plain sample vectors

pub mod clock;
pub mod denoise;
pub mod epoch;
pub mod flag;
pub mod log_parser;
pub mod noise;

pub use clock::{
    ClockWindow, CropBounds, SyncCase, SyncError, SyncWindow, TimeOfDay, compute_window,
};
pub use denoise::{
    DecompositionError, DenoiseConfig, DenoiseError, Wavelet, denoise, denoise_channels,
};
pub use epoch::{Epoch, EpochError, cut, sample_range, slice_epochs};
pub use flag::{Flag, UnknownFlag};
pub use log_parser::{FlagInterval, LogError, LogEvent, ParsedLog, parse, parse_file, parse_reader};
pub use noise::{NoiseError, NoisySegment, detect_noisy_segments};
