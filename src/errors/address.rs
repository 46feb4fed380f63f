//! Error types for the A1 notation codec.
//!
//! Address errors are split in two: an index that can never name a cell
//! ([`AddressError::InvalidAddress`]) and a string that does not follow the
//! A1 grammar ([`AddressError::MalformedRange`]).

/// Errors produced when encoding or decoding A1 references.
///
/// # Examples
///
/// ```rust
/// use gapi_sheets::a1::{decode_cell, encode_column};
/// use gapi_sheets::AddressError;
///
/// assert!(matches!(encode_column(0), Err(AddressError::InvalidAddress { .. })));
/// assert!(matches!(decode_cell("7C"), Err(AddressError::MalformedRange { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// A column or row index is out of range (zero, or too large to represent).
    #[error("Invalid address: {reason}")]
    InvalidAddress {
        /// Why the index was rejected
        reason: String,
    },

    /// The input does not match `letters+digits[":"letters+digits]`.
    #[error("Malformed range '{input}': {reason}")]
    MalformedRange {
        /// The offending input
        input: String,
        /// What was wrong with it
        reason: String,
    },
}

impl AddressError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        AddressError::InvalidAddress {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        AddressError::MalformedRange {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
