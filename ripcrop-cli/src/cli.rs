// ripcrop-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "ripcrop: Black bar detection for disc rips",
    long_about = "Detects letterbox and pillarbox bars in video files using ffmpeg's cropdetect via ripcrop-core."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detects the crop of a video file
    Crop(CropArgs),
    /// Prints video, audio and subtitle details of a video file
    Inspect(InspectArgs),
    /// Shows the detected crop in mpv and saves it to a crop file
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
pub struct CropArgs {
    /// Video file to analyse
    #[arg(required = true, value_name = "FILE")]
    pub input: PathBuf,

    /// How to print the detected crop
    #[arg(long, value_enum, default_value_t = CropFormat::Margins)]
    pub format: CropFormat,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Video file to inspect
    #[arg(required = true, value_name = "FILE")]
    pub input: PathBuf,

    /// Print only the crop margins instead of the full report
    #[arg(long)]
    pub print_crop: bool,

    /// Skip the idet interlacing check.
    /// Can also be disabled with RIPCROP_DETECT_INTERLACING=false.
    #[arg(long)]
    pub no_interlace_check: bool,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Video file to preview
    #[arg(required = true, value_name = "FILE")]
    pub input: PathBuf,

    /// Where to save the crop margins; an existing file is never overwritten
    #[arg(long, value_name = "PATH", default_value = "crop.txt")]
    pub crop_file: PathBuf,

    /// Skip the mpv preview and only save the crop
    #[arg(long)]
    pub no_mpv: bool,
}

/// Output style for `crop`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropFormat {
    /// `top:bottom:left:right`
    Margins,
    /// ffmpeg filter, `crop=w:h:x:y`
    Ffmpeg,
    /// mpv preview option drawing the kept area
    Mpv,
    /// Full detection result as JSON
    Json,
}
