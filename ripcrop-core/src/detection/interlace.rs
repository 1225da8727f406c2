//! Interlacing artefact detection.
//!
//! A stream flagged progressive can still carry combed frames (telecined or
//! badly mastered DVD content). This samples the same timestamps as crop
//! detection, lets ffmpeg's `idet` classify each burst, and takes a strict
//! majority vote across bursts.

use super::sampler::{FieldOrderCounts, FieldOrderSampler};
use super::sampling::SamplingPlan;
use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Frames analysed by `idet` per sample.
pub const IDET_FRAME_COUNT: u32 = 100;

/// Classification of a single burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVote {
    Interlaced,
    Progressive,
    Undetermined,
}

impl FieldOrderCounts {
    /// A field order must outnumber both alternatives two to one to win.
    #[must_use]
    pub fn vote(&self) -> FieldVote {
        let dominates = |count: u64, others: &[u64]| others.iter().all(|&o| count > o.saturating_mul(2));

        if dominates(self.tff, &[self.progressive, self.undetermined])
            || dominates(self.bff, &[self.progressive, self.undetermined])
        {
            FieldVote::Interlaced
        } else if dominates(self.progressive, &[self.tff, self.bff, self.undetermined]) {
            FieldVote::Progressive
        } else {
            FieldVote::Undetermined
        }
    }
}

/// Tally of burst classifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterlaceVotes {
    pub interlaced: u32,
    pub progressive: u32,
    pub undetermined: u32,
}

impl InterlaceVotes {
    pub fn record(&mut self, vote: FieldVote) {
        match vote {
            FieldVote::Interlaced => self.interlaced += 1,
            FieldVote::Progressive => self.progressive += 1,
            FieldVote::Undetermined => self.undetermined += 1,
        }
    }

    /// One side must beat the other two combined.
    #[must_use]
    pub fn verdict(&self) -> InterlaceVerdict {
        if self.interlaced > self.progressive + self.undetermined {
            InterlaceVerdict::Interlaced
        } else if self.progressive > self.interlaced + self.undetermined {
            InterlaceVerdict::Progressive
        } else {
            InterlaceVerdict::Undetermined
        }
    }
}

/// Overall finding for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterlaceVerdict {
    Interlaced,
    Progressive,
    Undetermined,
}

impl fmt::Display for InterlaceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InterlaceVerdict::Interlaced => "interlaced",
            InterlaceVerdict::Progressive => "progressive",
            InterlaceVerdict::Undetermined => "undetermined",
        };
        f.write_str(text)
    }
}

/// Votes over every planned sample of `input`.
///
/// Samples without statistics cast no vote.
pub fn detect_interlacing_artefacts<S: FieldOrderSampler + ?Sized>(
    sampler: &S,
    input: &Path,
    duration_secs: f64,
) -> CoreResult<InterlaceVerdict> {
    let plan = SamplingPlan::for_duration(duration_secs)?;
    log::info!("Detecting interlacing artefacts for {}", input.display());

    let mut votes = InterlaceVotes::default();
    for timestamp_secs in plan.timestamps() {
        match sampler.sample_field_order(input, timestamp_secs, IDET_FRAME_COUNT) {
            Some(counts) => {
                let vote = counts.vote();
                log::debug!("idet at {}s: {:?} -> {:?}", timestamp_secs, counts, vote);
                votes.record(vote);
            }
            None => log::debug!("idet at {}s: no statistics", timestamp_secs),
        }
    }

    let verdict = votes.verdict();
    log::info!("Interlacing verdict {} from {:?}", verdict, votes);
    Ok(verdict)
}
