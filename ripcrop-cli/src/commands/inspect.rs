// ripcrop-cli/src/commands/inspect.rs
//
// Implementation of the `inspect` command.

use crate::cli::InspectArgs;
use crate::commands::prepare_input;
use crate::error::CliResult;
use log::info;
use ripcrop_core::{CoreConfig, FfmpegCropSampler, FfmpegIdetSampler, inspect_media};

/// Builds the inspection report (or just the margins with `--print-crop`).
pub fn run_inspect(config: &CoreConfig, args: &InspectArgs) -> CliResult<String> {
    let media = prepare_input(config, &args.input)?;
    info!("Inspecting {}", args.input.display());

    let crop_sampler = FfmpegCropSampler::new(config.spawner());

    // Only the margins are printed, so the idet pass would be wasted.
    let check_interlacing = config.detect_interlacing && !args.no_interlace_check && !args.print_crop;
    let idet_sampler = check_interlacing.then(|| FfmpegIdetSampler::new(config.spawner()));

    let report = inspect_media(media, &crop_sampler, idet_sampler.as_ref())?;

    if args.print_crop {
        Ok(report.crop.margins.to_string())
    } else {
        Ok(report.render().trim_end().to_string())
    }
}
