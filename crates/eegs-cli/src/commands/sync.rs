//! Sync command for aligning the device recording with a log.

use std::io::Write;

use anyhow::{Result, bail};
use eegs_core::{CropBounds, ParsedLog, SyncCase, SyncWindow, TimeOfDay, compute_window};
use serde::Serialize;

/// Sync window plus the crop it implies on the device timeline.
#[derive(Debug, Serialize)]
struct SyncReport {
    #[serde(flatten)]
    sync: SyncWindow,
    crop: CropBounds,
}

pub fn run<W: Write>(
    writer: &mut W,
    log: &ParsedLog,
    device_start: TimeOfDay,
    device_duration: f64,
    json: bool,
) -> Result<()> {
    let (Some(log_start), Some(log_duration)) = (log.anchor_time(), log.duration_secs) else {
        bail!("log has no F1 press; cannot synchronize without an anchor");
    };

    let sync = compute_window(log_start, log_duration as f64, device_start, device_duration);
    let crop = sync.window.crop_bounds(device_duration);

    if json {
        let report = SyncReport { sync, crop };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let case = match sync.case {
        SyncCase::DeviceLeads => "device started first",
        SyncCase::DeviceLags => "log started first",
    };
    writeln!(writer, "Case: {case}")?;
    writeln!(writer, "Synchronized start: {}", sync.sync_start)?;
    writeln!(writer, "Synchronized end: {}", sync.sync_end)?;
    writeln!(writer, "Cut from start: {:.1} s", sync.window.cut_from_start)?;
    writeln!(writer, "Cut from end: {:.1} s", sync.window.cut_from_end)?;
    writeln!(
        writer,
        "Crop: {:.1} .. {:.1} s ({:.1} s kept)",
        crop.tmin,
        crop.tmax,
        crop.span_secs()
    )?;

    if let Err(err) = sync.window.checked_crop_bounds(device_duration) {
        writeln!(writer, "Warning: {err}")?;
    }

    Ok(())
}
