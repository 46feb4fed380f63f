//! Error types for Apps Script execution.

use super::RequestError;

/// Errors from running an Apps Script function.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script id or function name was empty.
    #[error("Invalid script call: {reason}")]
    InvalidCall {
        /// What was missing
        reason: String,
    },

    /// The underlying request failed.
    #[error("Script request failed: {0}")]
    Request(#[from] RequestError),
}
