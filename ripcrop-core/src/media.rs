//! Typed view of the ffprobe data the inspection and detection steps need.
//!
//! Populated from ffprobe by [`crate::external::get_media_info`]; kept free of
//! ffprobe types so reports can be built and tested without the tool.

use crate::geometry::FrameSize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStream {
    pub index: i64,
    pub codec_name: String,
    pub width: u32,
    pub height: u32,
    /// `progressive`, `tt`, `bb`, `tb`, `bt`; absent is treated as progressive.
    pub field_order: Option<String>,
}

impl VideoStream {
    #[must_use]
    pub fn frame_size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Whether the stream is flagged as interlaced by its container.
    #[must_use]
    pub fn is_interlaced_encoding(&self) -> bool {
        self.field_order
            .as_deref()
            .is_some_and(|order| order != "progressive")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStream {
    pub index: i64,
    pub codec_name: String,
    pub profile: Option<String>,
    pub channels: Option<u32>,
    pub channel_layout: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleStream {
    pub index: i64,
    pub codec_name: String,
    pub language: Option<String>,
    /// Number of subtitle elements from the Matroska statistics tags.
    pub element_count: Option<String>,
    pub default: bool,
    pub forced: bool,
}

/// ffprobe result for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub filename: String,
    pub duration_secs: f64,
    /// First video stream of the input.
    pub video: VideoStream,
    pub audio: Vec<AudioStream>,
    pub subtitles: Vec<SubtitleStream>,
}
