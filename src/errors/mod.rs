//! Error types for the gapi-sheets library.
//!
//! The layout is hybrid:
//!
//! - **Module-specific errors** for fine-grained handling ([`AddressError`],
//!   [`DriveError`], [`SpreadsheetError`], [`ScriptError`])
//! - **Request errors** shared by every API call ([`TransportError`],
//!   [`RequestError`])
//! - **Unified error type** ([`GapiError`]) for callers that do not need to
//!   distinguish sources
//!
//! # Examples
//!
//! ```rust,ignore
//! use gapi_sheets::{GapiError, GoogleApi};
//!
//! async fn example(api: &GoogleApi) -> Result<(), GapiError> {
//!     api.open_team_drive("Finance").await?;
//!     let spreadsheet = api.open_spreadsheet("Ledger").await?;
//!     let sheet = spreadsheet.sheet("2024").await?;
//!     sheet.append_row("A1", vec!["2024-01-01".into(), 42.into()]).await?;
//!     Ok(())
//! }
//! ```

mod address;
mod drive;
mod request;
mod script;
mod sheets;

pub use address::AddressError;
pub use drive::DriveError;
pub use request::{RequestError, TransportError};
pub use script::ScriptError;
pub use sheets::SpreadsheetError;

/// Unified error type for all gapi-sheets operations.
///
/// Every module-specific error converts into `GapiError` via `From`, so `?`
/// works across module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum GapiError {
    /// Error from the A1 codec.
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// Error from a Drive operation.
    #[error("Drive error: {0}")]
    Drive(#[from] DriveError),

    /// Error from a spreadsheet operation.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    /// Error from an Apps Script call.
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Error from a raw request.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),
}
