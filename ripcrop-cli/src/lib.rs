// ripcrop-cli/src/lib.rs
//
// Library portion of the ripcrop CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, CropArgs, CropFormat, InspectArgs, PreviewArgs};
pub use commands::crop::run_crop;
pub use commands::inspect::run_inspect;
pub use commands::preview::run_preview;
pub use error::CliResult;
