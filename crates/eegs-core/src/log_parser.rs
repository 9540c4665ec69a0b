//! Keystroke log parsing into labeled flag intervals.
//!
//! The operator marks experiment phases by pressing function keys while a
//! keylogger writes lines such as:
//!
//! ```text
//! 2024-05-14 10:00:00,412 - CRITICAL - Pressed Key.f1
//! ```
//!
//! # Algorithm Summary
//!
//! 1. Keep lines carrying both a `YYYY-MM-DD HH:MM:SS` token and a
//!    `Pressed <ns>.<key>` token whose key is in the [`Flag`] allow-list
//! 2. Latch the first `F1` as the anchor all offsets are measured from
//! 3. Feed events through a one-slot register; each new event closes an
//!    interval from the held event, except for key-repeat pairs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::TimeOfDay;
use crate::flag::Flag;

/// Pre-compiled pattern for the wall-clock timestamp token.
static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})").unwrap());

/// Pre-compiled pattern for the key press token.
static PRESSED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Pressed (\w+\.\w+)").unwrap());

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A recognised key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Wall-clock time of the press (second precision).
    pub timestamp: NaiveDateTime,
    pub flag: Flag,
}

impl LogEvent {
    /// Extracts an event from a single log line.
    ///
    /// Returns `None` unless the line carries both a valid timestamp and an
    /// allow-listed key.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        let time_caps = TIMESTAMP_RE.captures(line)?;
        let key_caps = PRESSED_RE.captures(line)?;

        let flag = Flag::from_key_token(&key_caps[1])?;
        let timestamp = NaiveDateTime::parse_from_str(&time_caps[1], TIMESTAMP_FORMAT).ok()?;
        Some(Self { timestamp, flag })
    }
}

/// A labeled span between two consecutive flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagInterval {
    /// Seconds from the anchor to the opening flag.
    pub start_offset_secs: f64,
    /// Seconds from the anchor to the closing flag.
    pub end_offset_secs: f64,
    pub start_flag: Flag,
    pub end_flag: Flag,
}

impl FlagInterval {
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.end_offset_secs - self.start_offset_secs
    }
}

/// Everything extracted from one log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedLog {
    /// Intervals in the order their closing flag was observed.
    pub intervals: Vec<FlagInterval>,
    /// Timestamp of the first `F1` press.
    pub anchor: Option<NaiveDateTime>,
    /// Whole seconds from the anchor to the last recognised press.
    pub duration_secs: Option<i64>,
}

impl ParsedLog {
    /// The anchor as a time of day, for clock synchronization.
    #[must_use]
    pub fn anchor_time(&self) -> Option<TimeOfDay> {
        self.anchor.map(|anchor| TimeOfDay::from(anchor.time()))
    }
}

/// The single current-flag slot.
#[derive(Debug, Clone, Copy)]
enum FlagRegister {
    Empty,
    Holding(LogEvent),
}

/// Mutable state for one pass over the log.
#[derive(Debug)]
struct ParseState {
    register: FlagRegister,
    anchor: Option<NaiveDateTime>,
    last_event_time: Option<NaiveDateTime>,
    intervals: Vec<FlagInterval>,
    suppressed: usize,
}

impl ParseState {
    const fn new() -> Self {
        Self {
            register: FlagRegister::Empty,
            anchor: None,
            last_event_time: None,
            intervals: Vec::new(),
            suppressed: 0,
        }
    }

    fn offset_secs(&self, at: NaiveDateTime) -> f64 {
        self.anchor.map_or(0.0, |anchor| (at - anchor).num_seconds() as f64)
    }

    fn feed(&mut self, event: LogEvent) {
        if event.flag == Flag::F1 && self.anchor.is_none() {
            self.anchor = Some(event.timestamp);
        }

        match self.register {
            FlagRegister::Empty => {}
            FlagRegister::Holding(prev) if Flag::is_key_repeat(prev.flag, event.flag) => {
                self.suppressed += 1;
            }
            FlagRegister::Holding(prev) => {
                self.intervals.push(FlagInterval {
                    start_offset_secs: self.offset_secs(prev.timestamp),
                    end_offset_secs: self.offset_secs(event.timestamp),
                    start_flag: prev.flag,
                    end_flag: event.flag,
                });
            }
        }

        self.register = FlagRegister::Holding(event);
        self.last_event_time = Some(event.timestamp);
    }

    fn finish(self) -> ParsedLog {
        let duration_secs = match (self.anchor, self.last_event_time) {
            (Some(anchor), Some(last)) => Some((last - anchor).num_seconds()),
            _ => None,
        };

        ParsedLog {
            intervals: self.intervals,
            anchor: self.anchor,
            duration_secs,
        }
    }
}

/// Parses log lines into flag intervals, anchor and session duration.
///
/// Lines that do not describe an allow-listed key press are skipped. A log
/// without any `F1` press yields no anchor, no duration and zero offsets.
pub fn parse<I, S>(lines: I) -> ParsedLog
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ParseState::new();
    let mut scanned = 0usize;
    let mut recognised = 0usize;

    for line in lines {
        scanned += 1;
        if let Some(event) = LogEvent::from_line(line.as_ref()) {
            recognised += 1;
            state.feed(event);
        }
    }

    let suppressed = state.suppressed;
    let parsed = state.finish();

    tracing::debug!(
        scanned,
        recognised,
        intervals = parsed.intervals.len(),
        suppressed,
        "parsed flag log"
    );
    if parsed.anchor.is_none() && recognised > 0 {
        tracing::warn!("no F1 press found; interval offsets fall back to zero");
    }

    parsed
}

/// Reads the whole input and parses it.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<ParsedLog, LogError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse(text.lines()))
}

/// Parses a log file.
pub fn parse_file(path: &Path) -> Result<ParsedLog, LogError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}
