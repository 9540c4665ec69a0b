//! Intervals command for listing the flag intervals of a log.

use std::io::Write;

use anyhow::Result;
use eegs_core::ParsedLog;

pub fn run<W: Write>(writer: &mut W, log: &ParsedLog, json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(log)?)?;
        return Ok(());
    }

    match log.anchor {
        Some(anchor) => writeln!(writer, "Anchor: {anchor}")?,
        None => writeln!(writer, "Anchor: none (no F1 press found)")?,
    }
    if let Some(duration) = log.duration_secs {
        writeln!(writer, "Duration: {duration} s")?;
    }

    if log.intervals.is_empty() {
        writeln!(writer, "No intervals.")?;
        return Ok(());
    }

    writeln!(writer, "Intervals:")?;
    for interval in &log.intervals {
        writeln!(
            writer,
            "- {} -> {}: {:.1} .. {:.1} s ({:.1} s)",
            interval.start_flag,
            interval.end_flag,
            interval.start_offset_secs,
            interval.end_offset_secs,
            interval.duration_secs()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    const LOG: &str = "\
2024-05-14 10:00:00,101 - CRITICAL - Pressed Key.f1
2024-05-14 10:00:05,220 - CRITICAL - Pressed Key.f6
2024-05-14 10:00:40,003 - CRITICAL - Pressed Key.f3
2024-05-14 10:00:41,917 - CRITICAL - Pressed Key.f4
2024-05-14 10:01:10,500 - CRITICAL - Released Key.f4
2024-05-14 10:02:30,000 - CRITICAL - Pressed Key.f7
";

    fn render(log: &ParsedLog, json: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, log, json).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn intervals_command_lists_intervals() {
        let log = eegs_core::parse(LOG.lines());
        assert_snapshot!(render(&log, false), @r"
        Anchor: 2024-05-14 10:00:00
        Duration: 150 s
        Intervals:
        - F1 -> F6: 0.0 .. 5.0 s (5.0 s)
        - F6 -> F3: 5.0 .. 40.0 s (35.0 s)
        - F4 -> F7: 41.0 .. 150.0 s (109.0 s)
        ");
    }

    #[test]
    fn intervals_command_without_anchor() {
        let log = eegs_core::parse(["2024-05-14 10:00:05 - Pressed Key.f6"]);
        assert_snapshot!(render(&log, false), @r"
        Anchor: none (no F1 press found)
        No intervals.
        ");
    }

    #[test]
    fn intervals_command_json() {
        let log = eegs_core::parse(LOG.lines().take(2));
        let value: serde_json::Value = serde_json::from_str(&render(&log, true)).unwrap();

        assert_eq!(value["anchor"], "2024-05-14T10:00:00");
        assert_eq!(value["duration_secs"], 5);
        assert_eq!(value["intervals"][0]["start_flag"], "F1");
        assert_eq!(value["intervals"][0]["end_flag"], "F6");
        assert_eq!(value["intervals"][0]["end_offset_secs"], 5.0);
    }
}
