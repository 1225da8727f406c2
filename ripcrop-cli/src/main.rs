// ripcrop-cli/src/main.rs
//
// Main entry point for the ripcrop CLI application.
//
// Parses arguments, sets up logging, dispatches to the command
// implementations in the library part of this crate and maps errors to
// exit code 1. Results go to stdout; logs go to stderr.

use clap::Parser;
use ripcrop_cli::logging::init_logging;
use ripcrop_cli::{Cli, Commands, run_crop, run_inspect, run_preview};
use ripcrop_core::CoreConfig;
use std::process;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CoreConfig::from_env();
    log::debug!("Configuration: {:?}", config);

    let result = match &cli.command {
        Commands::Crop(args) => run_crop(&config, args),
        Commands::Inspect(args) => run_inspect(&config, args),
        Commands::Preview(args) => run_preview(&config, args),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    }
}
