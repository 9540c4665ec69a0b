//! Cut command for extracting a time span from every channel.

use std::io::Write;

use anyhow::{Context, Result};
use eegs_core::cut;

use super::util::format_row;

/// Writes `[tmin, tmax]` of each channel, one comma-separated row per channel.
pub fn run<W: Write>(
    writer: &mut W,
    channels: &[Vec<f64>],
    sfreq: f64,
    tmin: f64,
    tmax: f64,
) -> Result<()> {
    for (index, channel) in channels.iter().enumerate() {
        let samples = cut(channel, sfreq, tmin, tmax)
            .with_context(|| format!("failed to cut channel {index}"))?;
        writeln!(writer, "{}", format_row(&samples))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn render(channels: &[Vec<f64>], tmin: f64, tmax: f64) -> Result<String> {
        let mut output = Vec::new();
        run(&mut output, channels, 10.0, tmin, tmax)?;
        Ok(String::from_utf8(output)?)
    }

    fn ramp(offset: i32) -> Vec<f64> {
        (0..30_i32).map(|i| f64::from(i + offset)).collect()
    }

    #[test]
    fn cut_command_keeps_both_edges() {
        assert_snapshot!(render(&[ramp(0), ramp(100)], 1.0, 1.5).unwrap(), @r"
        10,11,12,13,14,15
        110,111,112,113,114,115
        ");
    }

    #[test]
    fn cut_command_requires_tmin_before_tmax() {
        let err = render(&[ramp(0)], 2.0, 2.0).unwrap_err();
        assert_eq!(err.to_string(), "failed to cut channel 0");
        assert!(format!("{err:#}").contains("must be less than"));
    }

    #[test]
    fn cut_command_past_the_end() {
        let err = render(&[ramp(0)], 1.0, 5.0).unwrap_err();
        assert!(format!("{err:#}").contains("beyond the last sample"));
    }
}
