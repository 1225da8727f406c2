//! FFprobe integration for media analysis and information extraction
//!
//! This module runs ffprobe through the `ffprobe` crate and maps its output
//! onto [`MediaInfo`]: duration, the first video stream, and every audio and
//! subtitle stream in container order.
//!
//! The `ffprobe` crate only models a few well-known stream tags, so the
//! Matroska statistics tags (`NUMBER_OF_FRAMES`) are read with a second,
//! narrow ffprobe call and parsed with serde_json.
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::media::{AudioStream, MediaInfo, SubtitleStream, VideoStream};
use ffprobe::{FfProbe, FfProbeError, ffprobe};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

/// Statistics tag written by mkvmerge, with and without language suffix.
const ELEMENT_COUNT_TAGS: [&str; 2] = ["NUMBER_OF_FRAMES-eng", "NUMBER_OF_FRAMES"];

#[derive(Debug, Deserialize)]
struct RawProbe {
    #[serde(default)]
    streams: Vec<RawStream>,
}

#[derive(Debug, Deserialize)]
struct RawStream {
    index: i64,
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Probes `input_path` and returns its typed media information.
pub fn get_media_info(input_path: &Path) -> CoreResult<MediaInfo> {
    log::debug!(
        "Running ffprobe (via crate) for media info on: {}",
        input_path.display()
    );
    let mut info = match ffprobe(input_path) {
        Ok(metadata) => media_info_from_probe(&metadata, input_path)?,
        Err(err) => {
            log::error!("ffprobe failed for media info on {}: {:?}", input_path.display(), err);
            return Err(map_ffprobe_error(err, "media info"));
        }
    };

    if !info.subtitles.is_empty() {
        // Counts are informational; a failure here leaves them unknown.
        match get_subtitle_element_counts(input_path) {
            Ok(counts) => apply_element_counts(&mut info.subtitles, &counts),
            Err(e) => log::warn!(
                "Could not read subtitle statistics for {}: {}",
                input_path.display(),
                e
            ),
        }
    }
    Ok(info)
}

/// Reads the per-stream subtitle element counts, keyed by stream index.
pub fn get_subtitle_element_counts(input_path: &Path) -> CoreResult<HashMap<i64, String>> {
    let mut cmd = Command::new("ffprobe");
    cmd.args(["-v", "quiet", "-print_format", "json"])
        .args(["-select_streams", "s"])
        .args(["-show_entries", "stream=index:stream_tags"])
        .arg(input_path);
    log::debug!("Running: {:?}", cmd);

    let output = cmd
        .output()
        .map_err(|e| command_start_error("ffprobe (subtitle tags)", e))?;
    if !output.status.success() {
        return Err(command_failed_error(
            "ffprobe (subtitle tags)",
            output.status,
            String::from_utf8_lossy(&output.stderr),
        ));
    }
    parse_subtitle_element_counts(&output.stdout)
}

/// Extracts element counts from ffprobe `-show_entries stream=index:stream_tags` JSON.
pub fn parse_subtitle_element_counts(json: &[u8]) -> CoreResult<HashMap<i64, String>> {
    let probe: RawProbe = serde_json::from_slice(json).map_err(|e| {
        CoreError::JsonParseError(format!("ffprobe subtitle tags deserialization: {e}"))
    })?;

    Ok(probe
        .streams
        .into_iter()
        .filter_map(|stream| {
            let count = ELEMENT_COUNT_TAGS
                .iter()
                .find_map(|tag| stream.tags.get(*tag).cloned())?;
            Some((stream.index, count))
        })
        .collect())
}

fn apply_element_counts(subtitles: &mut [SubtitleStream], counts: &HashMap<i64, String>) {
    for stream in subtitles {
        stream.element_count = counts.get(&stream.index).cloned();
    }
}

fn media_info_from_probe(metadata: &FfProbe, input_path: &Path) -> CoreResult<MediaInfo> {
    let duration_secs = metadata
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| {
            CoreError::FfprobeParse(format!(
                "Failed to parse duration from format for {}",
                input_path.display()
            ))
        })?;

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::VideoInfoError(format!(
                "No video stream found in {}",
                input_path.display()
            ))
        })?;

    let width = video_stream.width.ok_or_else(|| {
        CoreError::VideoInfoError(format!(
            "Video stream missing width in {}",
            input_path.display()
        ))
    })?;
    let height = video_stream.height.ok_or_else(|| {
        CoreError::VideoInfoError(format!(
            "Video stream missing height in {}",
            input_path.display()
        ))
    })?;

    let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(CoreError::VideoInfoError(format!(
                "Invalid dimensions found in {}: width={}, height={}",
                input_path.display(),
                width,
                height
            )));
        }
    };

    let video = VideoStream {
        index: video_stream.index,
        codec_name: video_stream.codec_name.clone().unwrap_or_default(),
        width,
        height,
        field_order: video_stream.field_order.clone(),
    };

    let language = |s: &ffprobe::Stream| s.tags.as_ref().and_then(|t| t.language.clone());

    let audio = metadata
        .streams
        .iter()
        .filter(|s| s.codec_type.as_deref() == Some("audio"))
        .map(|s| AudioStream {
            index: s.index,
            codec_name: s.codec_name.clone().unwrap_or_default(),
            profile: s.profile.clone(),
            channels: s.channels.and_then(|c| u32::try_from(c).ok()),
            channel_layout: s.channel_layout.clone().filter(|l| !l.is_empty()),
            language: language(s),
        })
        .collect();

    let subtitles = metadata
        .streams
        .iter()
        .filter(|s| s.codec_type.as_deref() == Some("subtitle"))
        .map(|s| SubtitleStream {
            index: s.index,
            codec_name: s.codec_name.clone().unwrap_or_default(),
            language: language(s),
            element_count: None,
            default: s.disposition.default != 0,
            forced: s.disposition.forced != 0,
        })
        .collect();

    Ok(MediaInfo {
        filename: metadata.format.filename.clone(),
        duration_secs,
        video,
        audio,
        subtitles,
    })
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => {
            command_start_error(format!("ffprobe ({context})"), io_err)
        }
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => CoreError::JsonParseError(format!(
            "ffprobe {context} output deserialization: {err}"
        )),
        _ => CoreError::FfprobeParse(format!(
            "Unknown ffprobe error during {context}: {err:?}"
        )),
    }
}
