// ripcrop-cli/src/commands/preview.rs
//
// Implementation of the `preview` command: detect the crop, show it in mpv
// with everything outside the kept area inverted, then save the margins for
// the encode step.

use crate::cli::PreviewArgs;
use crate::commands::crop::detect_input_crop;
use crate::error::CliResult;
use log::{info, warn};
use ripcrop_core::{CoreConfig, CropMargins, Rectangle, check_dependency_with, ensure_input_file};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Result of saving the margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropFileOutcome {
    Written,
    AlreadyExists,
}

/// Runs the preview and returns the line to print.
pub fn run_preview(config: &CoreConfig, args: &PreviewArgs) -> CliResult<String> {
    ensure_input_file(&args.input)?;
    if !args.no_mpv {
        check_dependency_with("mpv", "--version")?;
    }

    let detection = detect_input_crop(config, &args.input)?;

    if !args.no_mpv {
        launch_mpv(&args.input, &detection.rectangle)?;
    }

    match write_crop_file(&args.crop_file, &detection.margins)? {
        CropFileOutcome::Written => {
            info!("Saved crop to {}", args.crop_file.display());
            Ok(detection.margins.to_string())
        }
        CropFileOutcome::AlreadyExists => {
            warn!("Not overwriting {}", args.crop_file.display());
            Ok(format!(
                "{} already exists. Detected crop: {}",
                args.crop_file.display(),
                detection.margins
            ))
        }
    }
}

/// mpv video filter option inverting everything outside `kept`.
#[must_use]
pub fn mpv_drawbox_option(kept: &Rectangle) -> String {
    format!("--vf=lavfi=[drawbox={}:invert:1]", kept.to_mpv_drawbox())
}

/// mpv command showing `input` with the area outside `kept` inverted.
#[must_use]
pub fn mpv_command(input: &Path, kept: &Rectangle) -> Command {
    let mut cmd = Command::new("mpv");
    cmd.arg("--no-audio").arg(mpv_drawbox_option(kept)).arg(input);
    cmd
}

fn launch_mpv(input: &Path, kept: &Rectangle) -> CliResult<()> {
    let mut cmd = mpv_command(input, kept);
    log::debug!("Running: {:?}", cmd);
    let status = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| ripcrop_core::error::command_start_error("mpv", e))?;
    // Closing the player early is not an error.
    if !status.success() {
        warn!("mpv exited with {}", status);
    }
    Ok(())
}

/// Writes `margins` to `path` unless the file already exists.
pub fn write_crop_file(path: &Path, margins: &CropMargins) -> CliResult<CropFileOutcome> {
    let file = OpenOptions::new().write(true).create_new(true).open(path);
    match file {
        Ok(mut file) => {
            write!(file, "{margins}")?;
            Ok(CropFileOutcome::Written)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(CropFileOutcome::AlreadyExists),
        Err(e) => Err(e.into()),
    }
}
