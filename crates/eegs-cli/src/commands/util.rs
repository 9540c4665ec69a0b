//! Shared utilities for CLI commands.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use eegs_core::ParsedLog;
use regex::Regex;

/// Separators between samples on one channel row.
static SAMPLE_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,\s]+").unwrap());

/// Parses a signal matrix: one channel per line, samples separated by commas
/// and/or whitespace. Blank lines and `#` comments are skipped.
pub fn parse_signal(text: &str) -> Result<Vec<Vec<f64>>> {
    let mut channels = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let channel = SAMPLE_SEPARATOR_RE
            .split(line)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<f64>()
                    .with_context(|| format!("line {}: invalid sample {token:?}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        channels.push(channel);
    }
    Ok(channels)
}

/// Reads a signal matrix from disk.
pub fn read_signal(path: &Path) -> Result<Vec<Vec<f64>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read signal {}", path.display()))?;
    let channels =
        parse_signal(&text).with_context(|| format!("failed to parse signal {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        channels = channels.len(),
        samples = channels.first().map_or(0, Vec::len),
        "loaded signal"
    );
    Ok(channels)
}

/// Reads and parses a keystroke log.
pub fn read_log(path: &Path) -> Result<ParsedLog> {
    eegs_core::parse_file(path).with_context(|| format!("failed to read log {}", path.display()))
}

/// Joins samples into one comma-separated row.
pub fn format_row(samples: &[f64]) -> String {
    samples
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signal_mixed_separators() {
        let text = "# fp1, fp2\n1, 2,3\n\n  -0.5\t4e-6   7\n";
        let channels = parse_signal(text).unwrap();
        assert_eq!(channels, vec![vec![1.0, 2.0, 3.0], vec![-0.5, 4e-6, 7.0]]);
    }

    #[test]
    fn test_parse_signal_trailing_separator() {
        let channels = parse_signal("1,2,3,\n").unwrap();
        assert_eq!(channels, vec![vec![1.0, 2.0, 3.0]]);
    }

    #[test]
    fn test_parse_signal_reports_line() {
        let err = parse_signal("1,2\n3,abc\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: invalid sample \"abc\"");
    }

    #[test]
    fn test_parse_signal_empty() {
        assert!(parse_signal("# nothing\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_read_signal_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = read_signal(&temp.path().join("missing.csv")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read signal"));
    }

    #[test]
    fn test_format_row() {
        assert_eq!(format_row(&[1.0, -0.25, 3.5]), "1,-0.25,3.5");
        assert_eq!(format_row(&[]), "");
    }
}
