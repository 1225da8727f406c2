//! ffmpeg `cropdetect` backed [`FrameSampler`].
//!
//! Seeks to the requested timestamp, runs the edge detector over a short burst
//! and scrapes the `crop=w:h:x:y` reports from ffmpeg's log. Any failure to
//! spawn, read or finish the process yields an empty detection list.

use super::ffmpeg_executor::{FfmpegSpawner, collect_log_lines};
use crate::detection::{CropSensitivity, FrameSampler, SampleRequest};
use crate::geometry::Rectangle;
use ffmpeg_sidecar::command::FfmpegCommand;
use once_cell::sync::Lazy;
use regex::Regex;

static CROP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"crop=(\d+):(\d+):(\d+):(\d+)").expect("valid cropdetect regex")
});

/// Samples frames with ffmpeg's `cropdetect` filter.
#[derive(Debug, Clone, Default)]
pub struct FfmpegCropSampler<S> {
    spawner: S,
}

impl<S: FfmpegSpawner> FfmpegCropSampler<S> {
    pub fn new(spawner: S) -> Self {
        Self { spawner }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    fn build_command(&self, request: &SampleRequest<'_>) -> FfmpegCommand {
        let mut cmd = self.spawner.command();
        cmd.hide_banner();
        cmd.args(["-nostdin", "-noaccurate_seek"]);
        cmd.args(["-ss", &request.timestamp_secs.to_string()]);
        cmd.input(&*request.input.to_string_lossy());
        cmd.args(["-frames:v", &request.frame_count.to_string()]);
        cmd.args(["-filter:v", &cropdetect_filter(request.sensitivity)]);
        cmd.args(["-an", "-sn", "-ignore_unknown"]);
        cmd.format("null");
        cmd.output("-");
        cmd
    }
}

impl<S: FfmpegSpawner> FrameSampler for FfmpegCropSampler<S> {
    fn sample(&self, request: &SampleRequest<'_>) -> Vec<Rectangle> {
        let cmd = self.build_command(request);
        let mut detections = Vec::new();

        let result = collect_log_lines(&self.spawner, cmd, |line| {
            log::trace!("cropdetect: {}", line);
            if let Some(rect) = parse_crop_line(line) {
                detections.push(rect);
            }
        });

        match result {
            Ok(()) => detections,
            Err(e) => {
                log::warn!(
                    "cropdetect failed at {}s for {}, treating sample as empty: {}",
                    request.timestamp_secs,
                    request.input.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}

/// `cropdetect=LIMIT:ROUND`, limit on the 0-255 scale.
#[must_use]
pub fn cropdetect_filter(sensitivity: CropSensitivity) -> String {
    format!("cropdetect={}:{}", sensitivity.limit, sensitivity.round)
}

/// Extracts the rectangle from one cropdetect log line, if it carries one.
#[must_use]
pub fn parse_crop_line(line: &str) -> Option<Rectangle> {
    let caps = CROP_REGEX.captures(line)?;
    let field = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    Some(Rectangle::new(field(1)?, field(2)?, field(3)?, field(4)?))
}

/// Every rectangle reported in a block of ffmpeg output.
#[must_use]
pub fn parse_crop_output(output: &str) -> Vec<Rectangle> {
    output.lines().filter_map(parse_crop_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cropdetect_filter() {
        assert_eq!(
            cropdetect_filter(crate::detection::CROP_SENSITIVITY),
            "cropdetect=24:2"
        );
    }

    #[test]
    fn test_parse_crop_line() {
        let line = "[Parsed_cropdetect_0 @ 0x7f8] x1:0 x2:1919 y1:140 y2:939 w:1920 h:800 x:0 y:140 pts:0 t:0.000000 crop=1920:800:0:140";
        assert_eq!(parse_crop_line(line), Some(Rectangle::new(1920, 800, 0, 140)));

        let line = "[Parsed_cropdetect_0 @ 0x7f8] crop=1920:800:0:140 pts:1234 t:1.234";
        assert_eq!(parse_crop_line(line), Some(Rectangle::new(1920, 800, 0, 140)));
    }

    #[test]
    fn test_parse_crop_line_rejects_noise() {
        assert_eq!(parse_crop_line(""), None);
        assert_eq!(parse_crop_line("frame=   15 fps=0.0 q=-0.0 Lsize=N/A"), None);
        assert_eq!(parse_crop_line("[Parsed_cropdetect_0 @ 0x7f8] crop=invalid:format"), None);
        assert_eq!(parse_crop_line("crop=1920:800:0"), None);
        // Does not fit in u32.
        assert_eq!(parse_crop_line("crop=99999999999:800:0:140"), None);
    }

    #[test]
    fn test_parse_crop_output_keeps_order() {
        let output = "Input #0, matroska,webm, from 'movie.mkv':\n\
                      [Parsed_cropdetect_0 @ 0x1] crop=1920:800:0:140\n\
                      [Parsed_cropdetect_0 @ 0x1] crop=1920:804:0:138\n\
                      frame=   15 fps=0.0 q=-0.0 Lsize=N/A time=00:00:00.62\n\
                      [Parsed_cropdetect_0 @ 0x1] crop=1916:800:2:140\n";
        assert_eq!(
            parse_crop_output(output),
            vec![
                Rectangle::new(1920, 800, 0, 140),
                Rectangle::new(1920, 804, 0, 138),
                Rectangle::new(1916, 800, 2, 140),
            ]
        );
        assert!(parse_crop_output("").is_empty());
    }
}
