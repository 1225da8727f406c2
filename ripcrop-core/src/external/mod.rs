// ============================================================================
// ripcrop-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every interaction with external command-line tools.
// The detectors only see the `FrameSampler` / `FieldOrderSampler` capabilities;
// the ffmpeg-backed implementations here own argument construction, log
// scraping, and the "failed sample means empty result" policy.
//
// KEY COMPONENTS:
// - Traits for process spawning (FfmpegSpawner, FfmpegProcess)
// - cropdetect and idet samplers built on those traits
// - ffprobe media information
// - Dependency checking

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// ffprobe media information
pub mod ffprobe_executor;

/// cropdetect frame sampler
pub mod cropdetect;

/// idet field order sampler
pub mod idet;

/// Scripted spawner for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use cropdetect::{FfmpegCropSampler, parse_crop_line, parse_crop_output};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::get_media_info;
pub use idet::{FfmpegIdetSampler, parse_idet_line};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs `cmd_name -version` with output discarded. Both ffmpeg and ffprobe
/// accept that flag.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    check_dependency_with(cmd_name, "-version")
}

/// Like [`check_dependency`], for tools spelling the flag differently
/// (mpv wants `--version`).
pub fn check_dependency_with(cmd_name: &str, version_arg: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg(version_arg)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Ok(status) => {
            log::warn!("Dependency '{}' exited with {}", cmd_name, status);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Checks every tool in `cmd_names`, stopping at the first missing one.
pub fn check_dependencies<'a, I>(cmd_names: I) -> CoreResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    cmd_names.into_iter().try_for_each(check_dependency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency() {
        let err = check_dependency("ripcrop-surely-not-a-real-binary").unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(name) if name == "ripcrop-surely-not-a-real-binary"));

        let err = check_dependency_with("ripcrop-surely-not-a-real-player", "--version").unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(_)));
    }
}
