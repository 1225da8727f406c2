//! Capabilities the detectors consume to look at actual frames.
//!
//! Both traits are infallible by contract. Implementations wrapping external
//! tools must turn process or parsing failures into an empty result, so that
//! one bad sample never aborts a whole detection run.

use crate::geometry::Rectangle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Black-level sensitivity handed to the edge detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSensitivity {
    /// Pixel values at or below this count as black (0-255 scale).
    pub limit: u32,
    /// Detected width/height are rounded down to a multiple of this.
    pub round: u32,
}

/// One burst of frames to examine for black borders.
#[derive(Debug, Clone, Copy)]
pub struct SampleRequest<'a> {
    pub input: &'a Path,
    pub timestamp_secs: u64,
    pub frame_count: u32,
    pub sensitivity: CropSensitivity,
}

/// Detects the bounding box of non-black content in short bursts of frames.
pub trait FrameSampler {
    /// Returns one rectangle per analysed frame that reported content.
    ///
    /// An empty vector is a valid answer and means "no detections".
    fn sample(&self, request: &SampleRequest<'_>) -> Vec<Rectangle>;
}

impl<F> FrameSampler for F
where
    F: Fn(&SampleRequest<'_>) -> Vec<Rectangle>,
{
    fn sample(&self, request: &SampleRequest<'_>) -> Vec<Rectangle> {
        self(request)
    }
}

/// Multi-frame field order statistics of one burst (ffmpeg `idet`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOrderCounts {
    pub tff: u64,
    pub bff: u64,
    pub progressive: u64,
    pub undetermined: u64,
}

/// Classifies field order over a burst of frames.
pub trait FieldOrderSampler {
    /// `None` when the burst produced no usable statistics.
    fn sample_field_order(
        &self,
        input: &Path,
        timestamp_secs: u64,
        frame_count: u32,
    ) -> Option<FieldOrderCounts>;
}

impl<F> FieldOrderSampler for F
where
    F: Fn(&Path, u64, u32) -> Option<FieldOrderCounts>,
{
    fn sample_field_order(
        &self,
        input: &Path,
        timestamp_secs: u64,
        frame_count: u32,
    ) -> Option<FieldOrderCounts> {
        self(input, timestamp_secs, frame_count)
    }
}
