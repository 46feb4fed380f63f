// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use super::Sheet;
use crate::errors::{AddressError, SpreadsheetError};
use crate::types::sheets::CellValue;

/// Snapshot of one row of a sheet
///
/// Reads are served from the snapshot. Writes go to the server first; the
/// snapshot changes only after the server accepted the write.
#[derive(Debug, Clone)]
pub struct Row {
    sheet: Sheet,
    position: u32,
    values: Vec<CellValue>,
}

impl Row {
    pub(super) fn new(sheet: Sheet, position: u32, values: Vec<CellValue>) -> Self {
        Self {
            sheet,
            position,
            values,
        }
    }

    /// 0-based row index within the sheet
    pub fn index(&self) -> u32 {
        self.position
    }

    /// Sheet this row belongs to
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Values as last read or written; trailing empty cells are absent
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    /// Value of the 0-based `column`, if present in the snapshot
    pub fn get(&self, column: usize) -> Option<&CellValue> {
        self.values.get(column)
    }

    /// Number of values in the snapshot
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Writes one cell, then updates the snapshot
    pub async fn set(
        &mut self,
        column: usize,
        value: impl Into<CellValue>,
    ) -> Result<(), SpreadsheetError> {
        let value = value.into();
        let cell = self.sheet.cell_range(self.position, column_index(column)?)?;
        self.sheet
            .update_range(&cell, vec![vec![value.clone()]])
            .await?;
        self.store(column, value);
        Ok(())
    }

    /// Clears one cell, then blanks it in the snapshot
    pub async fn clear(&mut self, column: usize) -> Result<(), SpreadsheetError> {
        let cell = self.sheet.cell_range(self.position, column_index(column)?)?;
        self.sheet.clear_range(&cell).await?;
        self.store(column, CellValue::String(String::new()));
        Ok(())
    }

    /// Overwrites the row from column A to the sheet's last column
    pub async fn update(&mut self, values: Vec<CellValue>) -> Result<(), SpreadsheetError> {
        let (columns, _) = self.sheet.dimensions().await?;
        let range = self.sheet.row_range(self.position, columns)?;
        self.sheet
            .update_range(&range, vec![values.clone()])
            .await?;
        self.values = values;
        Ok(())
    }

    fn store(&mut self, column: usize, value: CellValue) {
        if self.values.len() <= column {
            self.values
                .resize(column + 1, CellValue::String(String::new()));
        }
        self.values[column] = value;
    }
}

fn column_index(column: usize) -> Result<u32, AddressError> {
    u32::try_from(column)
        .ok()
        .filter(|column| *column < u32::MAX)
        .ok_or_else(|| AddressError::invalid(format!("column index {column} is too large")))
}
