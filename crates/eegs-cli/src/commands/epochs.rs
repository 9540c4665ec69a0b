//! Epochs command for slicing a cropped signal along the flag intervals.

use std::io::Write;

use anyhow::{Context, Result, bail};
use eegs_core::{Flag, ParsedLog, slice_epochs};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct EpochSummary {
    start_flag: Flag,
    end_flag: Flag,
    start_offset_secs: f64,
    end_offset_secs: f64,
    first_sample: usize,
    end_sample: usize,
    n_samples: usize,
}

/// Slices the first channel; the signal must already be cropped so that
/// sample 0 is the log anchor.
pub fn run<W: Write>(
    writer: &mut W,
    log: &ParsedLog,
    channels: &[Vec<f64>],
    sfreq: f64,
    json: bool,
) -> Result<()> {
    let Some(reference) = channels.first() else {
        bail!("signal has no channels");
    };
    if log.anchor.is_none() {
        tracing::warn!("log has no F1 anchor; interval offsets are all zero");
    }

    let epochs =
        slice_epochs(reference, sfreq, &log.intervals).context("failed to slice epochs")?;
    let summaries: Vec<EpochSummary> = epochs
        .iter()
        .map(|epoch| EpochSummary {
            start_flag: epoch.interval.start_flag,
            end_flag: epoch.interval.end_flag,
            start_offset_secs: epoch.interval.start_offset_secs,
            end_offset_secs: epoch.interval.end_offset_secs,
            first_sample: epoch.range.start,
            end_sample: epoch.range.end,
            n_samples: epoch.samples.len(),
        })
        .collect();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summaries)?)?;
        return Ok(());
    }

    if summaries.is_empty() {
        writeln!(writer, "No epochs.")?;
        return Ok(());
    }

    writeln!(writer, "Epochs at {sfreq} Hz:")?;
    for summary in &summaries {
        writeln!(
            writer,
            "- {} -> {}: samples {}..{} ({} samples)",
            summary.start_flag,
            summary.end_flag,
            summary.first_sample,
            summary.end_sample,
            summary.n_samples
        )?;
    }
    Ok(())
}
