// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use super::{Row, Spreadsheet};
use crate::a1::{encode_cell, quote_sheet_name, split_sheet};
use crate::errors::SpreadsheetError;
use crate::types::sheets::{AppendOutcome, CellValue};

/// A handle bound to one sheet of a spreadsheet
///
/// Every call opens the sheet first. Bare ranges are qualified with this
/// sheet's title, never with whichever sheet happens to be open.
#[derive(Debug, Clone)]
pub struct Sheet {
    spreadsheet: Spreadsheet,
    title: String,
}

impl Sheet {
    pub(super) fn new(spreadsheet: Spreadsheet, title: &str) -> Self {
        Self {
            spreadsheet,
            title: title.to_string(),
        }
    }

    /// Sheet title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Spreadsheet this sheet belongs to
    pub fn spreadsheet(&self) -> &Spreadsheet {
        &self.spreadsheet
    }

    async fn activate(&self) -> Result<(), SpreadsheetError> {
        self.spreadsheet.open_sheet(&self.title).await
    }

    /// Opens this sheet and returns `range` qualified with its title
    ///
    /// A range that already names a sheet is passed through unchanged.
    async fn activate_range(&self, range: &str) -> Result<String, SpreadsheetError> {
        self.activate().await?;
        let (sheet, cells) = split_sheet(range)?;
        Ok(match sheet {
            Some(_) => range.to_string(),
            None => format!("{}!{cells}", quote_sheet_name(&self.title)),
        })
    }

    /// `(columns, rows)` of the grid
    pub async fn dimensions(&self) -> Result<(u32, u32), SpreadsheetError> {
        self.activate().await?;
        self.spreadsheet.sheet_dimensions(&self.title).await
    }

    /// Every value of the grid
    pub async fn values(&self) -> Result<Vec<Vec<CellValue>>, SpreadsheetError> {
        self.activate().await?;
        self.spreadsheet.sheet_values(&self.title).await
    }

    /// Number of rows in the grid, including empty ones
    pub async fn len(&self) -> Result<u32, SpreadsheetError> {
        Ok(self.dimensions().await?.1)
    }

    /// Whether the grid has no rows
    pub async fn is_empty(&self) -> Result<bool, SpreadsheetError> {
        Ok(self.len().await? == 0)
    }

    /// Snapshot of row `index` (0-based; negative counts from the end)
    pub async fn row(&self, index: i64) -> Result<Row, SpreadsheetError> {
        let (columns, rows) = self.dimensions().await?;
        let position = resolve_index(index, rows)?;
        let range = self.row_range(position, columns)?;
        let values = self
            .spreadsheet
            .get_range(&range)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();
        Ok(Row::new(self.clone(), position, values))
    }

    /// Overwrites row `index` (0-based; negative counts from the end)
    pub async fn set_row(
        &self,
        index: i64,
        values: Vec<CellValue>,
    ) -> Result<Vec<Vec<CellValue>>, SpreadsheetError> {
        let (columns, rows) = self.dimensions().await?;
        let position = resolve_index(index, rows)?;
        let range = self.row_range(position, columns)?;
        self.spreadsheet.update_range(&range, vec![values]).await
    }

    /// Values in `range` on this sheet
    pub async fn get_range(&self, range: &str) -> Result<Vec<Vec<CellValue>>, SpreadsheetError> {
        let range = self.activate_range(range).await?;
        self.spreadsheet.get_range(&range).await
    }

    /// Writes `values` to `range` on this sheet
    pub async fn update_range(
        &self,
        range: &str,
        values: Vec<Vec<CellValue>>,
    ) -> Result<Vec<Vec<CellValue>>, SpreadsheetError> {
        let range = self.activate_range(range).await?;
        self.spreadsheet.update_range(&range, values).await
    }

    /// Appends one row after the table at `range`
    pub async fn append_row(
        &self,
        range: &str,
        row: Vec<CellValue>,
    ) -> Result<AppendOutcome, SpreadsheetError> {
        let range = self.activate_range(range).await?;
        self.spreadsheet.append_row(&range, row).await
    }

    /// Appends rows after the table at `range`
    pub async fn append_rows(
        &self,
        range: &str,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<AppendOutcome, SpreadsheetError> {
        let range = self.activate_range(range).await?;
        self.spreadsheet.append_rows(&range, rows).await
    }

    /// Clears `range` on this sheet
    pub async fn clear_range(&self, range: &str) -> Result<(), SpreadsheetError> {
        let range = self.activate_range(range).await?;
        self.spreadsheet.clear_range(&range).await
    }

    /// A1 name of a 1-based cell, e.g. `(3, 7) -> "C7"`
    pub fn range_name(&self, column: u32, row: u32) -> Result<String, SpreadsheetError> {
        Ok(encode_cell(column, row)?)
    }

    /// `Title!A{n}:{last}{n}` for the 0-based row `position`
    pub(super) fn row_range(&self, position: u32, columns: u32) -> Result<String, SpreadsheetError> {
        let row = position + 1;
        Ok(format!(
            "{}!{}:{}",
            quote_sheet_name(&self.title),
            encode_cell(1, row)?,
            encode_cell(columns.max(1), row)?
        ))
    }

    /// `Title!{cell}` for a 0-based column of the 0-based row `position`
    pub(super) fn cell_range(&self, position: u32, column: u32) -> Result<String, SpreadsheetError> {
        Ok(format!(
            "{}!{}",
            quote_sheet_name(&self.title),
            encode_cell(column + 1, position + 1)?
        ))
    }
}

/// Maps a possibly negative row index onto `0..rows`
fn resolve_index(index: i64, rows: u32) -> Result<u32, SpreadsheetError> {
    let count = i64::from(rows);
    let resolved = if index < 0 { count + index } else { index };
    if (0..count).contains(&resolved) {
        u32::try_from(resolved).map_err(|_| SpreadsheetError::IndexOutOfRange { index, rows })
    } else {
        Err(SpreadsheetError::IndexOutOfRange { index, rows })
    }
}
