//! Denoise command for cleaning every channel of a signal matrix.

use std::io::Write;

use anyhow::{Context, Result};
use eegs_core::{DenoiseConfig, denoise_channels};

use super::util::format_row;

/// Writes the denoised channels, one comma-separated row per channel.
pub fn run<W: Write>(writer: &mut W, channels: &[Vec<f64>], config: &DenoiseConfig) -> Result<()> {
    let cleaned = denoise_channels(channels, config).context("failed to denoise signal")?;
    for channel in &cleaned {
        writeln!(writer, "{}", format_row(channel))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use eegs_core::Wavelet;

    use crate::commands::util::parse_signal;

    fn render(channels: &[Vec<f64>], config: &DenoiseConfig) -> Result<String> {
        let mut output = Vec::new();
        run(&mut output, channels, config)?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn denoise_command_keeps_shape() {
        let channels: Vec<Vec<f64>> = (0..3_i32)
            .map(|c| (0..64_i32).map(|i| f64::from(i * (c + 1)).sin()).collect())
            .collect();

        let output = render(&channels, &DenoiseConfig::adaptive(Wavelet::Sym4, 2)).unwrap();
        let parsed = parse_signal(&output).unwrap();

        assert_eq!(parsed.len(), 3);
        assert!(parsed.iter().all(|row| row.len() == 64));
    }

    #[test]
    fn denoise_command_zero_threshold_returns_input() {
        let channels = vec![
            (0..32_i32).map(|i| f64::from(i) * 0.5).collect::<Vec<_>>(),
            (0..32_i32).map(|i| f64::from(i % 4)).collect(),
        ];

        let output = render(&channels, &DenoiseConfig::fixed(Wavelet::Haar, 3, 0.0)).unwrap();
        let parsed = parse_signal(&output).unwrap();

        for (input, row) in channels.iter().zip(&parsed) {
            for (a, b) in input.iter().zip(row) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn denoise_command_silence() {
        let output = render(&[vec![0.0; 16]], &DenoiseConfig::adaptive(Wavelet::Haar, 1)).unwrap();
        assert_eq!(output.trim_end(), ["0"; 16].join(","));
    }

    #[test]
    fn denoise_command_reports_level_too_deep() {
        let err = render(&[vec![1.0; 8]], &DenoiseConfig::adaptive(Wavelet::Sym4, 1)).unwrap_err();
        assert_eq!(err.to_string(), "failed to denoise signal");
        assert!(format!("{err:#}").contains("too deep"));
    }
}
