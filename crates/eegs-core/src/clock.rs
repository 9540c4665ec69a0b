//! Dual-clock synchronization between the flag log and the device recording.
//!
//! Both clocks are compared as same-day times of day. The log defines the
//! canonical experiment timeline; the device recording is trimmed to match it,
//! but can never be extended to cover time it did not record.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SECONDS_PER_DAY: f64 = 86_400.0;
const MICROS_PER_DAY: i64 = 86_400_000_000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyncError {
    /// The value could not be read as `HH:MM:SS`.
    #[error("invalid time of day: {0} (expected HH:MM:SS)")]
    InvalidTimeOfDay(String),

    /// A cut would extend the recording instead of trimming it.
    #[error("negative cut from {edge}: {secs} s")]
    NegativeCut { edge: &'static str, secs: f64 },

    /// The crop span is empty or inverted.
    #[error("empty crop span: tmin {tmin} s >= tmax {tmax} s")]
    EmptySpan { tmin: f64, tmax: f64 },
}

/// Seconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(f64);

impl TimeOfDay {
    #[must_use]
    pub const fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    #[must_use]
    pub const fn seconds(self) -> f64 {
        self.0
    }

    /// Shifts the time by `secs`, without wrapping at midnight.
    #[must_use]
    pub fn plus(self, secs: f64) -> Self {
        Self(self.0 + secs)
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Keeps hours, minutes and whole seconds; sub-second precision is dropped.
    fn from(time: NaiveTime) -> Self {
        Self(f64::from(time.num_seconds_from_midnight()))
    }
}

impl From<NaiveDateTime> for TimeOfDay {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from(dt.time())
    }
}

impl FromStr for TimeOfDay {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")
            .map(Self::from)
            .map_err(|_| SyncError::InvalidTimeOfDay(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    /// Renders as `H:MM:SS[.ffffff]`, prefixed with `N day(s), ` outside a
    /// single day.
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut days = (self.0 / SECONDS_PER_DAY).floor() as i64;
        let mut micros = ((self.0 - days as f64 * SECONDS_PER_DAY) * 1e6).round() as i64;
        if micros >= MICROS_PER_DAY {
            days += 1;
            micros -= MICROS_PER_DAY;
        }

        if days != 0 {
            let plural = if days.abs() == 1 { "" } else { "s" };
            write!(f, "{days} day{plural}, ")?;
        }

        let secs = micros / 1_000_000;
        let fraction = micros % 1_000_000;
        write!(f, "{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)?;
        if fraction != 0 {
            write!(f, ".{fraction:06}")?;
        }
        Ok(())
    }
}

/// Seconds to trim from each end of the device recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockWindow {
    pub cut_from_start: f64,
    /// Negative when the device recording ends before the reference window.
    pub cut_from_end: f64,
}

/// Crop span on the device recording's own timeline, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBounds {
    pub tmin: f64,
    pub tmax: f64,
}

impl CropBounds {
    #[must_use]
    pub fn span_secs(&self) -> f64 {
        self.tmax - self.tmin
    }
}

impl ClockWindow {
    /// Raw crop span `[cut_from_start, device_duration - cut_from_end]`.
    ///
    /// No clamping is applied; degenerate geometries produce spans that
    /// reach past the recording.
    #[must_use]
    pub fn crop_bounds(&self, device_duration: f64) -> CropBounds {
        CropBounds {
            tmin: self.cut_from_start,
            tmax: device_duration - self.cut_from_end,
        }
    }

    /// Crop span that rejects negative cuts and empty spans.
    pub fn checked_crop_bounds(&self, device_duration: f64) -> Result<CropBounds, SyncError> {
        if self.cut_from_start < 0.0 {
            return Err(SyncError::NegativeCut {
                edge: "start",
                secs: self.cut_from_start,
            });
        }
        if self.cut_from_end < 0.0 {
            return Err(SyncError::NegativeCut {
                edge: "end",
                secs: self.cut_from_end,
            });
        }

        let bounds = self.crop_bounds(device_duration);
        if bounds.tmin >= bounds.tmax {
            return Err(SyncError::EmptySpan {
                tmin: bounds.tmin,
                tmax: bounds.tmax,
            });
        }
        Ok(bounds)
    }
}

/// Which recording started first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncCase {
    /// The device started at or before the log; the log span is the reference.
    DeviceLeads,
    /// The device started after the log; the reference starts at the device.
    DeviceLags,
}

/// The reference window on the wall clock and the matching cuts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncWindow {
    pub case: SyncCase,
    pub sync_start: TimeOfDay,
    pub sync_end: TimeOfDay,
    pub window: ClockWindow,
}

/// Computes the window shared by the log and the device recording.
///
/// `log_start` is the anchor time and `log_duration` the session duration
/// from the parsed log; the device values come from the recording loader.
pub fn compute_window(
    log_start: TimeOfDay,
    log_duration: f64,
    device_start: TimeOfDay,
    device_duration: f64,
) -> SyncWindow {
    let log_end = log_start.plus(log_duration);
    let device_end = device_start.plus(device_duration);

    let result = if device_start.seconds() <= log_start.seconds() {
        SyncWindow {
            case: SyncCase::DeviceLeads,
            sync_start: log_start,
            sync_end: log_end,
            window: ClockWindow {
                cut_from_start: log_start.seconds() - device_start.seconds(),
                cut_from_end: device_end.seconds() - log_end.seconds(),
            },
        }
    } else {
        let sync_end = device_start.plus(log_duration);
        SyncWindow {
            case: SyncCase::DeviceLags,
            sync_start: device_start,
            sync_end,
            window: ClockWindow {
                cut_from_start: 0.0,
                cut_from_end: device_end.seconds() - sync_end.seconds(),
            },
        }
    };

    tracing::debug!(
        case = ?result.case,
        sync_start = %result.sync_start,
        sync_end = %result.sync_end,
        cut_from_start = result.window.cut_from_start,
        cut_from_end = result.window.cut_from_end,
        "computed sync window"
    );
    if result.window.cut_from_end < 0.0 {
        tracing::warn!(
            cut_from_end = result.window.cut_from_end,
            "device recording ends before the reference window"
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(s: &str) -> TimeOfDay {
        s.parse().expect("valid time of day")
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_device_started_first() {
        let result = compute_window(tod("10:00:00"), 300.0, tod("09:59:00"), 400.0);

        assert_eq!(result.case, SyncCase::DeviceLeads);
        assert_close(result.window.cut_from_start, 60.0);
        assert_close(result.window.cut_from_end, 40.0);
        assert_eq!(result.sync_start, tod("10:00:00"));
        assert_eq!(result.sync_end, tod("10:05:00"));
    }

    #[test]
    fn test_device_started_after_log() {
        let result = compute_window(tod("10:00:00"), 300.0, tod("10:01:00"), 200.0);

        assert_eq!(result.case, SyncCase::DeviceLags);
        assert_close(result.window.cut_from_start, 0.0);
        assert_eq!(result.sync_start, tod("10:01:00"));
        assert_eq!(result.sync_end, tod("10:06:00"));
        // device ends 10:04:20, sync ends 10:06:00
        assert_close(result.window.cut_from_end, -100.0);
    }

    #[test]
    fn test_device_started_after_log_and_outlasts_it() {
        let result = compute_window(tod("10:00:00"), 300.0, tod("10:01:00"), 500.0);

        assert_eq!(result.case, SyncCase::DeviceLags);
        assert_close(result.window.cut_from_start, 0.0);
        assert_close(result.window.cut_from_end, 200.0);
    }

    #[test]
    fn test_equal_starts_use_log_span() {
        let result = compute_window(tod("12:30:00"), 120.0, tod("12:30:00"), 150.0);

        assert_eq!(result.case, SyncCase::DeviceLeads);
        assert_close(result.window.cut_from_start, 0.0);
        assert_close(result.window.cut_from_end, 30.0);
    }

    #[test]
    fn test_short_device_recording_is_not_corrected() {
        let result = compute_window(tod("10:00:00"), 300.0, tod("09:59:00"), 100.0);

        assert_eq!(result.case, SyncCase::DeviceLeads);
        assert_close(result.window.cut_from_start, 60.0);
        assert_close(result.window.cut_from_end, -260.0);

        let bounds = result.window.crop_bounds(100.0);
        assert_close(bounds.tmin, 60.0);
        assert_close(bounds.tmax, 360.0);
    }

    #[test]
    fn test_crop_span_matches_log_duration() {
        let result = compute_window(tod("10:00:00"), 300.0, tod("09:59:00"), 400.0);
        let bounds = result.window.crop_bounds(400.0);

        assert_close(bounds.tmin, 60.0);
        assert_close(bounds.tmax, 360.0);
        assert_close(bounds.span_secs(), 300.0);
    }

    #[test]
    fn test_checked_crop_bounds() {
        let ok = ClockWindow {
            cut_from_start: 60.0,
            cut_from_end: 40.0,
        };
        assert_eq!(
            ok.checked_crop_bounds(400.0),
            Ok(CropBounds {
                tmin: 60.0,
                tmax: 360.0
            })
        );

        let short = ClockWindow {
            cut_from_start: 0.0,
            cut_from_end: -100.0,
        };
        assert_eq!(
            short.checked_crop_bounds(200.0),
            Err(SyncError::NegativeCut {
                edge: "end",
                secs: -100.0
            })
        );

        let empty = ClockWindow {
            cut_from_start: 150.0,
            cut_from_end: 100.0,
        };
        assert_eq!(
            empty.checked_crop_bounds(200.0),
            Err(SyncError::EmptySpan {
                tmin: 150.0,
                tmax: 100.0
            })
        );
    }

    #[test]
    fn test_time_of_day_parsing() {
        assert_close(tod("09:59:00").seconds(), 35_940.0);
        assert_close(tod(" 00:00:01 ").seconds(), 1.0);

        let err = "25:00:00".parse::<TimeOfDay>().unwrap_err();
        assert_eq!(err, SyncError::InvalidTimeOfDay("25:00:00".into()));
        assert!("10:00".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_time_of_day_drops_date_and_fraction() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 5, 14)
            .and_then(|d| d.and_hms_milli_opt(10, 0, 0, 750))
            .unwrap();
        assert_close(TimeOfDay::from(dt).seconds(), 36_000.0);
    }

    #[test]
    fn test_time_of_day_display() {
        assert_eq!(TimeOfDay::from_seconds(0.0).to_string(), "0:00:00");
        assert_eq!(TimeOfDay::from_seconds(36_360.0).to_string(), "10:06:00");
        assert_eq!(TimeOfDay::from_seconds(3723.5).to_string(), "1:02:03.500000");
        assert_eq!(TimeOfDay::from_seconds(90_000.0).to_string(), "1 day, 1:00:00");
        assert_eq!(TimeOfDay::from_seconds(180_000.0).to_string(), "2 days, 2:00:00");
        assert_eq!(TimeOfDay::from_seconds(-1.0).to_string(), "-1 day, 23:59:59");
    }

    #[test]
    fn test_error_messages() {
        let err = SyncError::NegativeCut {
            edge: "end",
            secs: -100.0,
        };
        assert_eq!(err.to_string(), "negative cut from end: -100 s");
    }
}
