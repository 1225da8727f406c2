//! Human-readable summary of a rip: video geometry, crop, and stream list.

use crate::detection::{
    CropDetection, FieldOrderSampler, FrameSampler, InterlaceVerdict, detect_crop,
    detect_interlacing_artefacts,
};
use crate::error::CoreResult;
use crate::media::{AudioStream, MediaInfo, SubtitleStream};
use crate::utils::format_duration;
use std::fmt::Write as _;
use std::path::Path;

const UNDEFINED_LANGUAGE: &str = "undefined";

/// Everything `inspect` prints about one input.
#[derive(Debug, Clone)]
pub struct InspectionReport {
    pub media: MediaInfo,
    pub crop: CropDetection,
    /// `None` when the interlace check was skipped.
    pub interlacing: Option<InterlaceVerdict>,
}

/// Runs crop detection, and interlace detection when a sampler is given.
pub fn inspect_media<C, I>(
    media: MediaInfo,
    crop_sampler: &C,
    idet_sampler: Option<&I>,
) -> CoreResult<InspectionReport>
where
    C: FrameSampler + ?Sized,
    I: FieldOrderSampler + ?Sized,
{
    let input = Path::new(&media.filename);
    let crop = detect_crop(
        crop_sampler,
        input,
        media.duration_secs,
        media.video.frame_size(),
    )?;

    let interlacing = match idet_sampler {
        Some(sampler) => Some(detect_interlacing_artefacts(
            sampler,
            input,
            media.duration_secs,
        )?),
        None => None,
    };
    if interlacing == Some(InterlaceVerdict::Undetermined) {
        log::warn!("Unable to determine if {} is interlaced", media.filename);
    }

    Ok(InspectionReport {
        media,
        crop,
        interlacing,
    })
}

impl InspectionReport {
    /// Renders the multi-line report.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let video = &self.media.video;

        let interlaced = if video.is_interlaced_encoding() {
            ", interlaced"
        } else {
            ""
        };
        let artefacts = match self.interlacing {
            Some(InterlaceVerdict::Interlaced) => " with artefacts",
            _ => "",
        };

        let _ = writeln!(out, "Video:");
        let _ = writeln!(
            out,
            "     {}x{}, {}{}{}, {}, crop={}",
            video.width,
            video.height,
            video.codec_name,
            interlaced,
            artefacts,
            format_duration(self.media.duration_secs),
            self.crop.margins
        );

        let _ = writeln!(out, "Audio streams:");
        for (idx, stream) in self.media.audio.iter().enumerate() {
            let _ = writeln!(out, "  {}: {}", idx + 1, describe_audio(stream));
        }

        let _ = writeln!(out, "Subtitle streams:");
        for (idx, stream) in self.media.subtitles.iter().enumerate() {
            let _ = writeln!(out, "  {}: {}", idx + 1, describe_subtitle(stream));
        }

        out
    }
}

/// `language, layout, codec` for an audio stream.
#[must_use]
pub fn describe_audio(stream: &AudioStream) -> String {
    let language = stream.language.as_deref().unwrap_or(UNDEFINED_LANGUAGE);
    let layout = match (&stream.channel_layout, stream.channels) {
        (Some(layout), _) => layout.as_str(),
        (None, Some(1)) => "mono",
        (None, Some(2)) => "stereo",
        (None, _) => "unknown",
    };
    // DTS variants (HD MA, HRA, ES) only show up in the profile.
    let codec = match (stream.codec_name.as_str(), &stream.profile) {
        ("dts", Some(profile)) => profile.to_lowercase(),
        (name, _) => name.to_string(),
    };
    format!("{language}, {layout}, {codec}")
}

/// `language, codec, N elements[, default][, forced]` for a subtitle stream.
#[must_use]
pub fn describe_subtitle(stream: &SubtitleStream) -> String {
    let language = stream.language.as_deref().unwrap_or(UNDEFINED_LANGUAGE);
    let count = stream.element_count.as_deref().unwrap_or("unknown");
    let mut text = format!("{language}, {}, {count} elements", stream.codec_name);
    if stream.default {
        text.push_str(", default");
    }
    if stream.forced {
        text.push_str(", forced");
    }
    text
}
