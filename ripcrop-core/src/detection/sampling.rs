//! Timestamp sampling plan shared by the crop and interlace detectors.
//!
//! The plan spreads a small number of samples evenly across the input while
//! never sampling at 0s, where studio logos and fades to black live. On long
//! inputs the spacing is capped so that detection time stays bounded.

use crate::error::{CoreError, CoreResult};

/// Inputs shorter than this cannot be sampled meaningfully.
pub const MIN_DURATION_SECS: f64 = 2.0;

/// Number of samples aimed for before the spacing cap applies.
pub const DEFAULT_STEPS: u64 = 10;

/// Upper bound on the distance between two samples (5 minutes).
pub const TARGET_INTERVAL_SECS: u64 = 5 * 60;

/// How many samples to take and how far apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub steps: u64,
    pub interval_secs: u64,
}

impl SamplingPlan {
    /// Computes the plan for an input of `duration_secs`.
    ///
    /// Fails with [`CoreError::InvalidInput`] below [`MIN_DURATION_SECS`].
    pub fn for_duration(duration_secs: f64) -> CoreResult<Self> {
        if !duration_secs.is_finite() || duration_secs < MIN_DURATION_SECS {
            return Err(CoreError::InvalidInput(format!(
                "Duration too short: {duration_secs}"
            )));
        }

        let mut steps = DEFAULT_STEPS;
        let mut interval_secs = (duration_secs / (steps + 1) as f64).floor() as u64;

        if interval_secs == 0 {
            steps = 1;
            interval_secs = 1;
        } else if interval_secs > TARGET_INTERVAL_SECS {
            steps = ((duration_secs / TARGET_INTERVAL_SECS as f64).floor() as u64).saturating_sub(1);
            interval_secs = (duration_secs / (steps + 1) as f64).floor() as u64;
        }

        log::debug!(
            "Sampling plan for {:.2}s: {} step(s) every {}s",
            duration_secs,
            steps,
            interval_secs
        );

        Ok(Self {
            steps,
            interval_secs,
        })
    }

    /// Sample positions in seconds, in ascending order: `interval * 1 ..= interval * steps`.
    pub fn timestamps(&self) -> impl Iterator<Item = u64> + '_ {
        (1..=self.steps).map(move |step| self.interval_secs * step)
    }
}
