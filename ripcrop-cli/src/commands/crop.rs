// ripcrop-cli/src/commands/crop.rs
//
// Implementation of the `crop` command: read the streams, detect, print one line.

use crate::cli::{CropArgs, CropFormat};
use crate::commands::prepare_input;
use crate::commands::preview::mpv_drawbox_option;
use crate::error::CliResult;
use log::debug;
use ripcrop_core::{CoreConfig, CropDetection, FfmpegCropSampler, detect_crop, format_duration};
use std::path::Path;

/// Runs crop detection and returns the line to print.
pub fn run_crop(config: &CoreConfig, args: &CropArgs) -> CliResult<String> {
    let detection = detect_input_crop(config, &args.input)?;
    format_detection(&detection, args.format)
}

/// Validates and reads `input`, then runs crop detection on it.
pub fn detect_input_crop(config: &CoreConfig, input: &Path) -> CliResult<CropDetection> {
    let media = prepare_input(config, input)?;
    let frame_size = media.video.frame_size();
    debug!(
        "Read {}: {} {}, {}",
        input.display(),
        media.video.codec_name,
        frame_size,
        format_duration(media.duration_secs)
    );

    let sampler = FfmpegCropSampler::new(config.spawner());
    let detection = detect_crop(&sampler, input, media.duration_secs, frame_size)?;
    debug!(
        "Crop rectangle {} after {} samples ({} ignored)",
        detection.rectangle, detection.sample_count, detection.ignore_count
    );
    Ok(detection)
}

/// Renders a detection in the requested output style.
pub fn format_detection(detection: &CropDetection, format: CropFormat) -> CliResult<String> {
    let text = match format {
        CropFormat::Margins => detection.margins.to_string(),
        CropFormat::Ffmpeg => detection.rectangle.to_ffmpeg_filter(),
        CropFormat::Mpv => mpv_drawbox_option(&detection.rectangle),
        CropFormat::Json => detection.to_json()?,
    };
    Ok(text)
}
