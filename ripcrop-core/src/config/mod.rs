//! Configuration for the ripcrop-core library.
//!
//! Only the integration layer is configurable: which ffmpeg binary to run and
//! whether the slower interlace check runs during inspection. The detection
//! policy itself (sample count, spacing cap, sensitivity) is fixed in
//! [`crate::detection`].

pub mod utils;

use crate::external::SidecarSpawner;
use serde::{Deserialize, Serialize};
use utils::{get_env_bool, get_env_opt_string};

/// Environment variable naming the ffmpeg binary.
pub const ENV_FFMPEG_PATH: &str = "RIPCROP_FFMPEG_PATH";

/// Environment variable toggling the interlace check.
pub const ENV_DETECT_INTERLACING: &str = "RIPCROP_DETECT_INTERLACING";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// ffmpeg binary; `None` uses `ffmpeg` from `PATH`.
    pub ffmpeg_path: Option<String>,

    /// Run `idet` sampling as part of inspection.
    pub detect_interlacing: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            detect_interlacing: true,
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by `RIPCROP_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ffmpeg_path: get_env_opt_string(ENV_FFMPEG_PATH).or(defaults.ffmpeg_path),
            detect_interlacing: get_env_bool(ENV_DETECT_INTERLACING, defaults.detect_interlacing),
        }
    }

    /// Name of the ffmpeg binary to verify and run.
    #[must_use]
    pub fn ffmpeg_binary(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Spawner running the configured ffmpeg.
    #[must_use]
    pub fn spawner(&self) -> SidecarSpawner {
        match &self.ffmpeg_path {
            Some(path) => SidecarSpawner::with_ffmpeg_path(path.clone()),
            None => SidecarSpawner::new(),
        }
    }
}
