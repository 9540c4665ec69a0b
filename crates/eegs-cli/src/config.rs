//! Configuration loading and management.

use std::path::{Path, PathBuf};

use eegs_core::{DenoiseConfig, Wavelet};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Command-line flags take precedence over every value here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Wavelet basis for denoising.
    pub wavelet: Wavelet,
    /// Decomposition levels for denoising.
    pub level: usize,
    /// Estimate the denoising threshold from the data.
    pub adaptive: bool,
    /// Fixed denoising threshold, used when `adaptive` is off.
    pub threshold: f64,
    /// Amplitude above which a sample counts as noise, in microvolts.
    pub noise_threshold_uv: f64,
    /// Shortest noisy span worth reporting, in seconds.
    pub noise_min_duration: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wavelet: Wavelet::Sym4,
            level: 1,
            adaptive: true,
            threshold: 0.2,
            noise_threshold_uv: 100.0,
            noise_min_duration: 1.0,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // EEGS_LEVEL, EEGS_NOISE_THRESHOLD_UV, ...
        figment = figment.merge(Env::prefixed("EEGS_"));

        figment.extract()
    }

    /// Denoising settings, with `--threshold` or `--adaptive` overriding the
    /// configured mode.
    #[must_use]
    pub fn denoise_config(
        &self,
        wavelet: Option<Wavelet>,
        level: Option<usize>,
        threshold: Option<f64>,
        adaptive: bool,
    ) -> DenoiseConfig {
        let wavelet = wavelet.unwrap_or(self.wavelet);
        let level = level.unwrap_or(self.level);
        match threshold {
            _ if adaptive => DenoiseConfig::adaptive(wavelet, level),
            Some(threshold) => DenoiseConfig::fixed(wavelet, level, threshold),
            None if self.adaptive => DenoiseConfig::adaptive(wavelet, level),
            None => DenoiseConfig::fixed(wavelet, level, self.threshold),
        }
    }
}

/// Returns the platform-specific config directory for eegs.
///
/// On Linux: `~/.config/eegs`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("eegs"))
}
