//! Utility functions for formatting and file operations.
//!
//! This module provides general-purpose helpers used by the inspection report
//! and the command-line front end.

use crate::error::{CoreError, CoreResult};
use std::path::Path;

/// Formats seconds as `H:MM:SS`, truncating fractions (e.g., 6137.9 -> "1:42:17").
///
/// Hours are not zero-padded and grow past 24. Returns "?:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "?:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours}:{minutes:02}:{secs:02}")
}

/// Ensures `path` names an existing regular file.
///
/// Folder inputs (including disc structures) are rejected.
pub fn ensure_input_file(path: &Path) -> CoreResult<()> {
    if !path.exists() {
        return Err(CoreError::PathError(format!("No such file: {}", path.display())));
    }
    if path.is_dir() {
        return Err(CoreError::PathError(format!(
            "Folder inputs are not supported: {}",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00:00");
        assert_eq!(format_duration(59.9), "0:00:59");
        assert_eq!(format_duration(3725.0), "1:02:05");
        assert_eq!(format_duration(6137.9), "1:42:17");
        assert_eq!(format_duration(90000.0), "25:00:00");
        assert_eq!(format_duration(-1.0), "?:??:??");
        assert_eq!(format_duration(f64::NAN), "?:??:??");
    }

    #[test]
    fn test_ensure_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_input_file(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::PathError(_)));
        assert!(err.to_string().contains("Folder inputs are not supported"));

        let missing = dir.path().join("missing.mkv");
        let err = ensure_input_file(&missing).unwrap_err();
        assert!(err.to_string().contains("No such file"));

        let present = dir.path().join("movie.mkv");
        std::fs::write(&present, b"dummy content").unwrap();
        assert!(ensure_input_file(&present).is_ok());
    }
}
