//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `crop` command.
pub mod crop;

/// Module containing the implementation of the `inspect` command.
pub mod inspect;

/// Module containing the implementation of the `preview` command.
pub mod preview;

use crate::error::CliResult;
use ripcrop_core::{CoreConfig, MediaInfo, check_dependencies, ensure_input_file, get_media_info};
use std::path::Path;

/// Validates the input and tools, then reads its stream information.
///
/// The input is checked first so a typo is reported as such even on a
/// machine without ffmpeg.
pub(crate) fn prepare_input(config: &CoreConfig, input: &Path) -> CliResult<MediaInfo> {
    ensure_input_file(input)?;
    check_dependencies([config.ffmpeg_binary(), "ffprobe"])?;
    get_media_info(input)
}
