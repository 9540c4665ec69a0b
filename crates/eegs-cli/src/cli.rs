//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eegs_core::{TimeOfDay, Wavelet};

/// Aligns a keystroke flag log with an EEG recording.
///
/// Parses the operator's flag log into labeled intervals, synchronizes it with
/// the device clock and cleans the signal before epoching.
#[derive(Debug, Parser)]
#[command(name = "eegs", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the flag intervals, anchor and duration of a log.
    Intervals {
        /// Keystroke log file.
        log: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute the crop window that aligns the device recording with a log.
    Sync {
        /// Keystroke log file.
        log: PathBuf,

        /// Wall-clock start of the device recording (HH:MM:SS).
        #[arg(long)]
        device_start: TimeOfDay,

        /// Length of the device recording in seconds.
        #[arg(long)]
        device_duration: f64,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Denoise each channel of a signal matrix.
    Denoise {
        /// Signal matrix file, one channel per line.
        signal: PathBuf,

        /// Wavelet basis (e.g. sym4, db2, haar).
        #[arg(long)]
        wavelet: Option<Wavelet>,

        /// Number of decomposition levels.
        #[arg(long)]
        level: Option<usize>,

        /// Fixed threshold; disables the adaptive estimate.
        #[arg(long, conflicts_with = "adaptive")]
        threshold: Option<f64>,

        /// Estimate the threshold from the finest detail band.
        #[arg(long)]
        adaptive: bool,
    },

    /// Cut a time span out of every channel of a signal matrix.
    Cut {
        /// Signal matrix file, one channel per line.
        signal: PathBuf,

        /// Sampling rate in Hz.
        #[arg(long)]
        sfreq: f64,

        /// Start of the span in seconds.
        #[arg(long)]
        tmin: f64,

        /// End of the span in seconds, inclusive.
        #[arg(long)]
        tmax: f64,
    },

    /// Find spans where the amplitude stays above a threshold.
    Noise {
        /// Signal matrix file, one channel per line, in volts.
        signal: PathBuf,

        /// Sampling rate in Hz.
        #[arg(long)]
        sfreq: f64,

        /// Amplitude threshold in microvolts.
        #[arg(long)]
        threshold_uv: Option<f64>,

        /// Minimum span length in seconds.
        #[arg(long)]
        min_duration: Option<f64>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Slice a cropped signal into one epoch per flag interval.
    Epochs {
        /// Keystroke log file.
        log: PathBuf,

        /// Signal matrix file, already cropped to start at the anchor.
        signal: PathBuf,

        /// Sampling rate in Hz.
        #[arg(long)]
        sfreq: f64,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
