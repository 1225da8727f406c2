//! ffmpeg `idet` backed [`FieldOrderSampler`].

use super::ffmpeg_executor::{FfmpegSpawner, collect_log_lines};
use crate::detection::{FieldOrderCounts, FieldOrderSampler};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static MULTI_FRAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Multi frame detection:\s*TFF:\s*(\d+)\s*BFF:\s*(\d+)\s*Progressive:\s*(\d+)\s*Undetermined:\s*(\d+)",
    )
    .expect("valid idet regex")
});

/// Classifies field order with ffmpeg's `idet` filter.
#[derive(Debug, Clone, Default)]
pub struct FfmpegIdetSampler<S> {
    spawner: S,
}

impl<S: FfmpegSpawner> FfmpegIdetSampler<S> {
    pub fn new(spawner: S) -> Self {
        Self { spawner }
    }
}

impl<S: FfmpegSpawner> FieldOrderSampler for FfmpegIdetSampler<S> {
    fn sample_field_order(
        &self,
        input: &Path,
        timestamp_secs: u64,
        frame_count: u32,
    ) -> Option<FieldOrderCounts> {
        let mut cmd = self.spawner.command();
        cmd.hide_banner();
        cmd.args(["-nostdin", "-noaccurate_seek"]);
        cmd.args(["-ss", &timestamp_secs.to_string()]);
        cmd.input(&*input.to_string_lossy());
        cmd.args(["-frames:v", &frame_count.to_string()]);
        cmd.args(["-filter:v", "idet"]);
        cmd.args(["-an", "-sn", "-ignore_unknown"]);
        cmd.format("null");
        cmd.output("-");

        // idet prints its summary once at the end; keep the last one seen.
        let mut counts = None;
        let result = collect_log_lines(&self.spawner, cmd, |line| {
            if let Some(parsed) = parse_idet_line(line) {
                counts = Some(parsed);
            }
        });

        if let Err(e) = result {
            log::warn!(
                "idet failed at {}s for {}, skipping sample: {}",
                timestamp_secs,
                input.display(),
                e
            );
            return None;
        }
        counts
    }
}

/// Parses the `Multi frame detection:` summary line of `idet`.
#[must_use]
pub fn parse_idet_line(line: &str) -> Option<FieldOrderCounts> {
    let caps = MULTI_FRAME_REGEX.captures(line)?;
    let field = |i: usize| caps.get(i)?.as_str().parse::<u64>().ok();
    Some(FieldOrderCounts {
        tff: field(1)?,
        bff: field(2)?,
        progressive: field(3)?,
        undetermined: field(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multi_frame_line() {
        let line = "[Parsed_idet_0 @ 0x55d] Multi frame detection: TFF:   88 BFF:    0 Progressive:    3 Undetermined:    9";
        assert_eq!(
            parse_idet_line(line),
            Some(FieldOrderCounts {
                tff: 88,
                bff: 0,
                progressive: 3,
                undetermined: 9
            })
        );
    }

    #[test]
    fn test_single_frame_line_is_ignored() {
        let line = "[Parsed_idet_0 @ 0x55d] Single frame detection: TFF:   40 BFF:    0 Progressive:   50 Undetermined:   10";
        assert_eq!(parse_idet_line(line), None);
        assert_eq!(parse_idet_line("Repeated Fields: Neither:   100 Top:     0 Bottom:     0"), None);
    }
}
