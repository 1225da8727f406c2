// ============================================================================
// ripcrop-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for ripcrop-core
//
// This module defines the error types used throughout the ripcrop-core library.
// Sampler failures are deliberately absent: a failed frame sample degrades to
// "no detections" inside the external adapters and never reaches the caller.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors surfaced by the ripcrop-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Required external dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Command '{0}' failed with status {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("ffprobe output parsing error: {0}")]
    FfprobeParse(String),

    #[error("JSON parsing error: {0}")]
    JsonParseError(String),

    #[error("Video information error: {0}")]
    VideoInfoError(String),
}

/// Result type used across ripcrop-core.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a [`CoreError::CommandWait`] for a command whose exit could not be collected.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] from a non-successful exit.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = CoreError::InvalidInput("Duration too short: 1.5".to_string());
        assert_eq!(err.to_string(), "Invalid input: Duration too short: 1.5");
    }

    #[test]
    fn test_command_start_error_keeps_name() {
        let err = command_start_error(
            "ffmpeg (cropdetect)",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        match err {
            CoreError::CommandStart(name, inner) => {
                assert_eq!(name, "ffmpeg (cropdetect)");
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }
}
