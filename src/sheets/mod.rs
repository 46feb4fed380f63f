// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Spreadsheet, sheet and row handles.
//!
//! ```text
//! GoogleApi ──open_spreadsheet──▶ Spreadsheet ──sheet──▶ Sheet ──row──▶ Row
//! ```
//!
//! A [`Spreadsheet`] remembers which of its sheets is open; bare ranges such
//! as `"A1:C3"` are resolved against that sheet. A [`Sheet`] opens itself
//! before every call, so ranges passed to it always target its own tab. A
//! [`Row`] is a snapshot: writes go to the server first and update the local
//! copy only after the server confirmed them.
//!
//! # Example
//!
//! ```rust,ignore
//! let spreadsheet = api.open_spreadsheet("Ledger").await?;
//! let sheet = spreadsheet.sheet("2024").await?;
//!
//! let mut last = sheet.row(-1).await?;
//! last.set(2, "paid").await?;
//!
//! sheet.append_row("A1", vec!["2024-04-01".into(), 120.into()]).await?;
//! ```

mod row;
mod sheet;
mod spreadsheet;

pub use row::Row;
pub use sheet::Sheet;
pub use spreadsheet::Spreadsheet;

use tracing::Instrument;

use crate::client::GoogleApi;
use crate::errors::{DriveError, SpreadsheetError};
use crate::spans;

impl GoogleApi {
    /// Opens a spreadsheet in the active drive scope by name
    ///
    /// Fails with [`DriveError::FileNotFound`] when no spreadsheet of that
    /// name exists, including when the name belongs to a non-spreadsheet file.
    pub async fn open_spreadsheet(&self, name: &str) -> Result<Spreadsheet, SpreadsheetError> {
        async move {
            let file = self.file(name).await?;
            if !file.is_spreadsheet() {
                return Err(DriveError::file_not_found(name).into());
            }

            let metadata = spreadsheet::fetch_metadata(self, &file.id).await?;
            self.inner
                .spreadsheets
                .insert(file.id.clone(), metadata)
                .await;
            Ok(Spreadsheet::new(self.clone(), file))
        }
        .instrument(spans::open_spreadsheet(name))
        .await
    }
}
