// ============================================================================
// ripcrop-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialisation for the CLI
//
// All log output goes to stderr so that stdout only carries the command's
// result (crop string or report).
//
// USAGE:
// - default: info
// - -v/--verbose: debug
// - RUST_LOG=...: overrides both, e.g. RUST_LOG=ripcrop_core=trace shows the
//   raw ffmpeg lines

use env_logger::{Builder, Env, Target};

/// Default filter for the given verbosity.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Initialises the global logger. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let _ = Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
