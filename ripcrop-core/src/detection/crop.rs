//! Automatic crop detection.
//!
//! The detector samples a handful of timestamps (see [`SamplingPlan`]), asks a
//! [`FrameSampler`] for the content bounding boxes of a short burst at each,
//! and folds the per-sample candidates into one rectangle.
//!
//! The fold is suspicious of samples that suddenly report the
//! whole frame right after samples that found borders: those are usually
//! black or transitional frames where the edge detector saw nothing, not
//! evidence that the letterbox disappeared. Such samples are counted and
//! skipped. Too many of them, or no usable sample at all, and the detector
//! gives up and reports "no crop" instead of guessing.

use super::sampler::{CropSensitivity, FrameSampler, SampleRequest};
use super::sampling::SamplingPlan;
use crate::error::{CoreError, CoreResult};
use crate::geometry::{CropMargins, FrameSize, Rectangle};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Frames analysed per sample.
pub const SAMPLE_FRAME_COUNT: u32 = 15;

/// Fixed cropdetect sensitivity: limit 24 of 255, round to 2 pixels.
pub const CROP_SENSITIVITY: CropSensitivity = CropSensitivity {
    limit: 24,
    round: 2,
};

/// More skipped samples than this forces "no crop".
pub const MAX_IGNORED_SAMPLES: u32 = 2;

/// Width slack, in pixels, under which a crop counts as measurement noise.
pub const NEAR_FULL_WIDTH_TOLERANCE: u32 = 2;

/// Unions every detection of one burst into the sample's candidate.
///
/// No detections at all yields the full frame: the sample found nothing to crop.
#[must_use]
pub fn candidate_from_detections(size: FrameSize, detections: &[Rectangle]) -> Rectangle {
    if detections.is_empty() {
        return Rectangle::full_frame(size);
    }
    detections
        .iter()
        .fold(Rectangle::inverse_extremum(size), |acc, r| acc.union(r))
}

/// Aggregate state of one detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropFold {
    size: FrameSize,
    crop: Rectangle,
    last_candidate: Rectangle,
    ignore_count: u32,
    sample_count: u32,
}

impl CropFold {
    #[must_use]
    pub fn new(size: FrameSize) -> Self {
        let start = Rectangle::inverse_extremum(size);
        Self {
            size,
            crop: start,
            last_candidate: start,
            ignore_count: 0,
            sample_count: 0,
        }
    }

    /// Folds the next candidate, in timestamp order.
    #[must_use]
    pub fn step(self, candidate: Rectangle) -> Self {
        let full_frame = Rectangle::full_frame(self.size);
        let spurious = candidate == full_frame && self.last_candidate != full_frame;

        let (crop, ignore_count) = if spurious {
            log::debug!("Ignoring full-frame sample following a cropped one");
            (self.crop, self.ignore_count + 1)
        } else {
            (self.crop.union(&candidate), self.ignore_count)
        };

        Self {
            crop,
            ignore_count,
            last_candidate: candidate,
            sample_count: self.sample_count + 1,
            ..self
        }
    }

    /// Running union of accepted candidates; may lie outside the frame early on.
    #[must_use]
    pub fn crop(&self) -> Rectangle {
        self.crop
    }

    #[must_use]
    pub fn ignore_count(&self) -> u32 {
        self.ignore_count
    }

    #[must_use]
    pub fn last_candidate(&self) -> Rectangle {
        self.last_candidate
    }

    /// Applies the "no crop" overrides and produces the final result.
    #[must_use]
    pub fn finish(self) -> CropDetection {
        let size = self.size;
        let no_evidence = self.crop == Rectangle::inverse_extremum(size);
        let too_noisy = self.ignore_count > MAX_IGNORED_SAMPLES;
        let near_full_frame = self.ignore_count > 0
            && size.width.saturating_sub(self.crop.width) <= NEAR_FULL_WIDTH_TOLERANCE
            && self.crop.height == size.height;

        let rectangle = if no_evidence || too_noisy || near_full_frame {
            log::debug!(
                "Reporting no crop (no_evidence={}, ignored={}, near_full_frame={})",
                no_evidence,
                self.ignore_count,
                near_full_frame
            );
            Rectangle::full_frame(size)
        } else {
            self.crop
        };

        CropDetection {
            frame_size: size,
            rectangle,
            margins: rectangle.to_margins(size),
            ignore_count: self.ignore_count,
            sample_count: self.sample_count,
        }
    }
}

/// Outcome of a crop detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropDetection {
    pub frame_size: FrameSize,
    pub rectangle: Rectangle,
    pub margins: CropMargins,
    pub ignore_count: u32,
    pub sample_count: u32,
}

impl CropDetection {
    /// True when the detector found nothing to crop.
    #[must_use]
    pub fn is_no_crop(&self) -> bool {
        self.margins.is_empty()
    }

    /// Serialises the detection for scripts consuming `--format json`.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::JsonParseError(format!("crop detection serialization: {e}")))
    }
}

/// Folds precomputed per-sample candidates, in order.
#[must_use]
pub fn detect_crop_from_candidates<I>(size: FrameSize, candidates: I) -> CropDetection
where
    I: IntoIterator<Item = Rectangle>,
{
    candidates
        .into_iter()
        .fold(CropFold::new(size), CropFold::step)
        .finish()
}

/// Detects the visible picture area of `input`.
///
/// Fails only when `duration_secs` is too short to sample; individual sample
/// failures are the sampler's to absorb.
pub fn detect_crop<S: FrameSampler + ?Sized>(
    sampler: &S,
    input: &Path,
    duration_secs: f64,
    frame_size: FrameSize,
) -> CoreResult<CropDetection> {
    let plan = SamplingPlan::for_duration(duration_secs)?;
    log::info!(
        "Detecting crop for {} ({}, {} samples)",
        input.display(),
        frame_size,
        plan.steps
    );

    let candidates = plan.timestamps().map(|timestamp_secs| {
        let request = SampleRequest {
            input,
            timestamp_secs,
            frame_count: SAMPLE_FRAME_COUNT,
            sensitivity: CROP_SENSITIVITY,
        };
        let detections = sampler.sample(&request);
        let candidate = candidate_from_detections(frame_size, &detections);
        log::debug!(
            "Sample at {}s: {} detection(s), candidate {}",
            timestamp_secs,
            detections.len(),
            candidate
        );
        candidate
    });

    let detection = detect_crop_from_candidates(frame_size, candidates);
    log::info!(
        "Detected crop {} (ignored {} of {} samples)",
        detection.margins,
        detection.ignore_count,
        detection.sample_count
    );
    Ok(detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const SMALL: FrameSize = FrameSize::new(200, 100);
    const CONTENT: Rectangle = Rectangle::new(100, 50, 10, 10);

    fn full(size: FrameSize) -> Rectangle {
        Rectangle::full_frame(size)
    }

    #[test]
    fn test_candidate_unions_burst() {
        let detections = [
            Rectangle::new(1916, 800, 2, 140),
            Rectangle::new(1920, 796, 0, 142),
            Rectangle::new(1910, 804, 4, 138),
        ];
        let size = FrameSize::new(1920, 1080);
        assert_eq!(
            candidate_from_detections(size, &detections),
            Rectangle::new(1920, 804, 0, 138)
        );
    }

    #[test]
    fn test_empty_burst_is_full_frame() {
        assert_eq!(candidate_from_detections(SMALL, &[]), full(SMALL));
    }

    #[test]
    fn test_all_full_frame_reports_no_crop() {
        let detection = detect_crop_from_candidates(SMALL, vec![full(SMALL); 10]);
        assert_eq!(detection.rectangle, full(SMALL));
        assert!(detection.is_no_crop());
        // Only the leading sample counts as a transition; the rest follow a
        // full frame and fold in.
        assert_eq!(detection.ignore_count, 1);
        assert_eq!(detection.sample_count, 10);
    }

    #[test]
    fn test_no_samples_reports_no_crop() {
        let detection = detect_crop_from_candidates(SMALL, Vec::new());
        assert_eq!(detection.rectangle, full(SMALL));
        assert_eq!(detection.sample_count, 0);
    }

    #[test]
    fn test_single_outlier_is_rejected() {
        let fold = CropFold::new(SMALL).step(CONTENT).step(CONTENT);
        assert_eq!(fold.ignore_count(), 0);

        let fold = fold.step(full(SMALL));
        assert_eq!(fold.ignore_count(), 1);
        assert_eq!(fold.crop(), CONTENT);
        assert_eq!(fold.last_candidate(), full(SMALL));

        let detection = fold.step(CONTENT).finish();
        assert_eq!(detection.rectangle, CONTENT);
        assert_eq!(
            detection.margins,
            CropMargins {
                top: 10,
                bottom: 40,
                left: 10,
                right: 90
            }
        );
        assert_eq!(detection.margins.to_string(), "10:40:10:90");
    }

    #[test]
    fn test_first_full_frame_sample_is_ignored() {
        // The starting state is not the full frame, so a leading full-frame
        // sample already counts as a transition.
        let fold = CropFold::new(SMALL).step(full(SMALL));
        assert_eq!(fold.ignore_count(), 1);
        assert_eq!(fold.crop(), Rectangle::inverse_extremum(SMALL));
    }

    #[test]
    fn test_consecutive_full_frames_fold_in() {
        // Only the first of a run of full-frame samples is skipped; the
        // second follows a full frame and is accepted as evidence.
        let detection =
            detect_crop_from_candidates(SMALL, [CONTENT, full(SMALL), full(SMALL), CONTENT]);
        assert_eq!(detection.ignore_count, 1);
        assert_eq!(detection.rectangle, full(SMALL));
    }

    #[test]
    fn test_more_than_two_ignored_forces_no_crop() {
        let candidates = [
            CONTENT,
            full(SMALL),
            CONTENT,
            full(SMALL),
            CONTENT,
            full(SMALL),
            CONTENT,
        ];
        let detection = detect_crop_from_candidates(SMALL, candidates);
        assert_eq!(detection.ignore_count, 3);
        assert_eq!(detection.rectangle, full(SMALL));
        assert!(detection.is_no_crop());
    }

    #[test]
    fn test_two_ignored_keeps_crop() {
        let candidates = [CONTENT, full(SMALL), CONTENT, full(SMALL), CONTENT];
        let detection = detect_crop_from_candidates(SMALL, candidates);
        assert_eq!(detection.ignore_count, 2);
        assert_eq!(detection.rectangle, CONTENT);
    }

    #[test]
    fn test_near_full_width_with_ignores_is_noise() {
        let size = FrameSize::new(1920, 1080);
        let near = Rectangle::new(1918, 1080, 0, 0);
        let detection = detect_crop_from_candidates(size, [near, full(size), near]);
        assert_eq!(detection.ignore_count, 1);
        assert_eq!(detection.rectangle, full(size));

        // Without any ignored sample the same narrow crop is kept.
        let detection = detect_crop_from_candidates(size, [near, near]);
        assert_eq!(detection.rectangle, near);
        assert_eq!(detection.margins.to_string(), "0:0:0:2");
    }

    #[test]
    fn test_near_full_width_needs_full_height() {
        let size = FrameSize::new(1920, 1080);
        let letterbox = Rectangle::new(1918, 800, 0, 140);
        let detection = detect_crop_from_candidates(size, [letterbox, full(size), letterbox]);
        assert_eq!(detection.rectangle, letterbox);
    }

    #[test]
    fn test_fold_is_deterministic() {
        let size = FrameSize::new(1920, 1080);
        let candidates = vec![
            Rectangle::new(1920, 800, 0, 140),
            full(size),
            Rectangle::new(1920, 804, 0, 138),
            Rectangle::new(1916, 800, 2, 140),
        ];
        let first = detect_crop_from_candidates(size, candidates.clone());
        for _ in 0..5 {
            assert_eq!(detect_crop_from_candidates(size, candidates.clone()), first);
        }
        assert_eq!(first.rectangle, Rectangle::new(1920, 804, 0, 138));
    }

    #[test]
    fn test_detect_crop_rejects_short_duration() {
        let sampler = |_: &SampleRequest<'_>| -> Vec<Rectangle> { panic!("must not sample") };
        let err = detect_crop(&sampler, Path::new("short.mkv"), 1.5, SMALL).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_detect_crop_drives_sampler_in_order() {
        let requests = RefCell::new(Vec::new());
        let sampler = |request: &SampleRequest<'_>| {
            requests.borrow_mut().push((
                request.timestamp_secs,
                request.frame_count,
                request.sensitivity,
            ));
            vec![CONTENT, Rectangle::new(96, 48, 12, 11)]
        };

        // 4 seconds: 4 / 11 floors to zero, so a single sample at 1s.
        let detection = detect_crop(&sampler, Path::new("clip.mkv"), 4.0, SMALL).unwrap();
        assert_eq!(detection.rectangle, CONTENT);
        assert_eq!(
            *requests.borrow(),
            vec![(1, SAMPLE_FRAME_COUNT, CROP_SENSITIVITY)]
        );

        // 44 seconds: ten samples four seconds apart.
        requests.borrow_mut().clear();
        let detection = detect_crop(&sampler, Path::new("clip.mkv"), 44.0, SMALL).unwrap();
        let timestamps: Vec<u64> = requests.borrow().iter().map(|r| r.0).collect();
        assert_eq!(timestamps, vec![4, 8, 12, 16, 20, 24, 28, 32, 36, 40]);
        assert_eq!(detection.rectangle, CONTENT);
        assert_eq!(detection.ignore_count, 0);
    }

    #[test]
    fn test_detect_crop_outlier_sample() {
        // Samples every 4s; the one at 12s sees only black.
        let sampler = |request: &SampleRequest<'_>| {
            if request.timestamp_secs == 12 {
                Vec::new()
            } else {
                vec![CONTENT]
            }
        };
        let detection = detect_crop(&sampler, Path::new("clip.mkv"), 44.0, SMALL).unwrap();
        assert_eq!(detection.ignore_count, 1);
        assert_eq!(detection.margins.to_string(), "10:40:10:90");
    }

    #[test]
    fn test_detection_json() {
        let detection = detect_crop_from_candidates(SMALL, [CONTENT]);
        let json: serde_json::Value = serde_json::from_str(&detection.to_json().unwrap()).unwrap();
        assert_eq!(json["margins"]["top"], 10);
        assert_eq!(json["margins"]["right"], 90);
        assert_eq!(json["rectangle"]["width"], 100);
        assert_eq!(json["ignore_count"], 0);
        assert_eq!(json["sample_count"], 1);
    }
}
