//! Error types for Drive operations.

use super::RequestError;

/// Errors from file and team-drive operations.
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    /// No file with this name exists in the active drive scope.
    #[error("File not found: {name}")]
    FileNotFound {
        /// Name that was looked up
        name: String,
    },

    /// A file with this name already exists in the active drive scope.
    #[error("File already exists: {name}")]
    FileAlreadyExists {
        /// Name that collided
        name: String,
    },

    /// No team drive with this name is visible to the caller.
    #[error("Team drive not found: {name}")]
    TeamDriveNotFound {
        /// Name that was looked up
        name: String,
    },

    /// The underlying request failed.
    #[error("Drive request failed: {0}")]
    Request(#[from] RequestError),
}

impl DriveError {
    pub(crate) fn file_not_found(name: impl Into<String>) -> Self {
        DriveError::FileNotFound { name: name.into() }
    }
}
