//! Noise command for locating high-amplitude spans.

use std::io::Write;

use anyhow::{Context, Result};
use eegs_core::detect_noisy_segments;

/// Microvolts to volts.
const UV_TO_V: f64 = 1e-6;

pub fn run<W: Write>(
    writer: &mut W,
    channels: &[Vec<f64>],
    sfreq: f64,
    threshold_uv: f64,
    min_duration: f64,
    json: bool,
) -> Result<()> {
    let segments = detect_noisy_segments(channels, sfreq, threshold_uv * UV_TO_V, min_duration)
        .context("failed to detect noisy segments")?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&segments)?)?;
        return Ok(());
    }

    if segments.is_empty() {
        writeln!(writer, "No noisy segments above {threshold_uv} uV.")?;
        return Ok(());
    }

    writeln!(writer, "Noisy segments above {threshold_uv} uV:")?;
    for segment in &segments {
        writeln!(
            writer,
            "- onset {:.3} s, duration {:.3} s",
            segment.onset_secs, segment.duration_secs
        )?;
    }
    Ok(())
}
