//! Error types for spreadsheet, sheet and row operations.

use super::{AddressError, DriveError, RequestError};

/// Errors from spreadsheet operations.
///
/// # Examples
///
/// ```rust,ignore
/// use gapi_sheets::{GoogleApi, SpreadsheetError};
///
/// async fn example(api: &GoogleApi) -> Result<(), SpreadsheetError> {
///     let spreadsheet = api.open_spreadsheet("Budget").await?;
///     match spreadsheet.sheet("2024").await {
///         Ok(sheet) => println!("{} rows", sheet.len().await?),
///         Err(SpreadsheetError::SheetNotFound { title, .. }) => {
///             spreadsheet.add_sheet(&title).await?;
///         }
///         Err(e) => return Err(e),
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SpreadsheetError {
    /// The spreadsheet has no sheet with this title.
    #[error("Sheet '{title}' not found in spreadsheet '{spreadsheet}'")]
    SheetNotFound {
        /// Spreadsheet that was searched
        spreadsheet: String,
        /// Sheet title that was looked up
        title: String,
    },

    /// A range names a sheet other than the one currently open and automatic
    /// opening was disabled.
    #[error("Range targets sheet '{requested}' but '{open}' is open")]
    SheetMismatch {
        /// Sheet named in the range
        requested: String,
        /// Sheet currently open
        open: String,
    },

    /// A row index is outside the sheet's grid.
    #[error("Row index {index} out of range for sheet with {rows} rows")]
    IndexOutOfRange {
        /// Requested index (negative indices count from the end)
        index: i64,
        /// Number of rows in the sheet grid
        rows: u32,
    },

    /// A range or cell could not be encoded.
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// File lookup failed, including opening a name that is not a spreadsheet.
    #[error("Drive error: {0}")]
    Drive(#[from] DriveError),

    /// The underlying request failed.
    #[error("Sheets request failed: {0}")]
    Request(#[from] RequestError),
}

impl SpreadsheetError {
    pub(crate) fn sheet_not_found(spreadsheet: impl Into<String>, title: impl Into<String>) -> Self {
        SpreadsheetError::SheetNotFound {
            spreadsheet: spreadsheet.into(),
            title: title.into(),
        }
    }
}
