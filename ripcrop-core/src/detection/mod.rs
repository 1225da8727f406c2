//! Timestamp-sampled video analysis.
//!
//! Everything here is pure aggregation over sampler capabilities; the
//! ffmpeg-backed samplers live in [`crate::external`].

/// Capabilities consumed by the detectors
pub mod sampler;

/// Sample timestamps shared by all detectors
pub mod sampling;

/// Black bar detection
pub mod crop;

/// Combing / field order detection
pub mod interlace;

pub use crop::{
    CROP_SENSITIVITY, CropDetection, CropFold, SAMPLE_FRAME_COUNT, candidate_from_detections,
    detect_crop, detect_crop_from_candidates,
};
pub use interlace::{InterlaceVerdict, InterlaceVotes, detect_interlacing_artefacts};
pub use sampler::{
    CropSensitivity, FieldOrderCounts, FieldOrderSampler, FrameSampler, SampleRequest,
};
pub use sampling::SamplingPlan;
