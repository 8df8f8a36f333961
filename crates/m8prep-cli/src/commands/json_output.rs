//! JSON output types for machine-readable CLI output.
//!
//! Structured output for the `--json` flag on `convert` and `check` so other
//! tools can parse results programmatically.

use serde::Serialize;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Input path is not a readable directory
    pub const INPUT_DIR: &str = "CLI_001";
    /// Invalid target bit depth
    pub const TARGET_BITS: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
