//! Core library for black bar and interlacing detection using ffmpeg and ffprobe.
//!
//! This crate samples a video at evenly spaced timestamps, folds the
//! per-sample `cropdetect` results into one conservative crop rectangle, and
//! reports it as margins. It can also vote on interlacing artefacts with
//! `idet` and render a short inspection report of the input's streams.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use ripcrop_core::{CoreConfig, FfmpegCropSampler, detect_crop, get_media_info};
//! use std::path::Path;
//!
//! let config = CoreConfig::from_env();
//! let input = Path::new("/path/to/movie.mkv");
//!
//! let info = get_media_info(input).unwrap();
//! let sampler = FfmpegCropSampler::new(config.spawner());
//! let detection = detect_crop(&sampler, input, info.duration_secs, info.video.frame_size()).unwrap();
//!
//! println!("{}", detection.margins);
//! ```

pub mod config;
pub mod detection;
pub mod error;
pub mod external;
pub mod geometry;
pub mod inspection;
pub mod media;
pub mod utils;

// Re-exports for public API
pub use config::CoreConfig;
pub use detection::{
    CropDetection, FieldOrderSampler, FrameSampler, InterlaceVerdict, SamplingPlan, detect_crop,
    detect_interlacing_artefacts,
};
pub use error::{CoreError, CoreResult};
pub use external::{
    FfmpegCropSampler, FfmpegIdetSampler, check_dependencies, check_dependency, check_dependency_with,
    get_media_info,
};
pub use geometry::{CropMargins, FrameSize, Rectangle};
pub use inspection::{InspectionReport, inspect_media};
pub use media::MediaInfo;
pub use utils::{ensure_input_file, format_duration};
