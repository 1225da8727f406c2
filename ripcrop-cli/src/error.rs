// ============================================================================
// ripcrop-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types for the CLI
//
// The CLI has no failure modes of its own beyond the core library's, so it
// reuses CoreError directly.

// ---- Internal crate imports ----
use ripcrop_core::CoreResult;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;
