// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Sheets v4 resources

use serde::{Deserialize, Serialize};

/// A single cell value as sent to and received from the Sheets API
///
/// Reads return formatted strings by default; writes accept strings, numbers,
/// booleans and null.
pub type CellValue = serde_json::Value;

/// Spreadsheet metadata (`spreadsheets.get` without grid data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetMeta {
    /// Spreadsheet id, identical to the Drive file id
    pub spreadsheet_id: String,
    /// Spreadsheet-wide properties
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    /// Sheets in tab order
    #[serde(default)]
    pub sheets: Vec<SheetMeta>,
    /// Browser URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_url: Option<String>,
}

impl SpreadsheetMeta {
    /// Looks up a sheet by title
    pub fn sheet(&self, title: &str) -> Option<&SheetProperties> {
        self.sheets
            .iter()
            .map(|sheet| &sheet.properties)
            .find(|properties| properties.title == title)
    }

    /// Sheet titles in tab order
    pub fn titles(&self) -> Vec<String> {
        self.sheets
            .iter()
            .map(|sheet| sheet.properties.title.clone())
            .collect()
    }

    /// Sum of `columns * rows` over every sheet
    pub fn total_cells(&self) -> u64 {
        self.sheets
            .iter()
            .map(|sheet| sheet.properties.grid_properties.cell_count())
            .sum()
    }
}

/// Spreadsheet-wide properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    /// Document title
    #[serde(default)]
    pub title: String,
    /// Locale, e.g. `en_US`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Time zone, e.g. `Europe/Madrid`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// One entry of `SpreadsheetMeta::sheets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMeta {
    /// Sheet properties
    pub properties: SheetProperties,
}

/// Properties of a single sheet (tab)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    /// Numeric id used by batch updates
    pub sheet_id: i64,
    /// Tab title
    pub title: String,
    /// Position in tab order
    #[serde(default)]
    pub index: u32,
    /// Grid size
    #[serde(default)]
    pub grid_properties: GridProperties,
}

impl SheetProperties {
    /// `(columns, rows)` of the grid
    pub fn dimensions(&self) -> (u32, u32) {
        (
            self.grid_properties.column_count,
            self.grid_properties.row_count,
        )
    }
}

/// Size of a sheet's grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    /// Number of rows
    #[serde(default)]
    pub row_count: u32,
    /// Number of columns
    #[serde(default)]
    pub column_count: u32,
}

impl GridProperties {
    /// `columns * rows`
    pub fn cell_count(&self) -> u64 {
        u64::from(self.column_count) * u64::from(self.row_count)
    }
}

/// A block of values (`spreadsheets.values` resource)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// Range in A1 notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// `ROWS` or `COLUMNS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Values; trailing empty rows and cells are omitted by the API
    #[serde(default)]
    pub values: Vec<Vec<CellValue>>,
}

impl ValueRange {
    /// Request body for writes
    pub(crate) fn for_write(range: &str, values: Vec<Vec<CellValue>>) -> Self {
        Self {
            range: Some(range.to_string()),
            major_dimension: None,
            values,
        }
    }

    /// Values, or a single empty row when the API returned none
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        if self.values.is_empty() {
            vec![Vec::new()]
        } else {
            self.values
        }
    }
}

/// Response of `spreadsheets.batchUpdate`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    /// Spreadsheet the requests were applied to
    #[serde(default)]
    pub spreadsheet_id: String,
    /// One reply per request
    #[serde(default)]
    pub replies: Vec<serde_json::Value>,
    /// New metadata, when `includeSpreadsheetInResponse` was set
    #[serde(default)]
    pub updated_spreadsheet: Option<SpreadsheetMeta>,
}

/// Response of `spreadsheets.values.update`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    /// Range that was written
    #[serde(default)]
    pub updated_range: Option<String>,
    /// Rows written
    #[serde(default)]
    pub updated_rows: Option<u32>,
    /// Columns written
    #[serde(default)]
    pub updated_columns: Option<u32>,
    /// Cells written
    #[serde(default)]
    pub updated_cells: Option<u32>,
    /// Values after the write, when `includeValuesInResponse` was set
    #[serde(default)]
    pub updated_data: Option<ValueRange>,
}

/// Result of an append
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    /// Range the rows were written to, e.g. `Sheet1!A5:C6`
    Range(String),
    /// The response did not carry `updates.updatedRange`
    Raw(serde_json::Value),
}

impl AppendOutcome {
    pub(crate) fn from_response(body: serde_json::Value) -> Self {
        match body
            .get("updates")
            .and_then(|updates| updates.get("updatedRange"))
            .and_then(serde_json::Value::as_str)
        {
            Some(range) => AppendOutcome::Range(range.to_string()),
            None => AppendOutcome::Raw(body),
        }
    }

    /// The updated range, if the API reported one
    pub fn updated_range(&self) -> Option<&str> {
        match self {
            AppendOutcome::Range(range) => Some(range),
            AppendOutcome::Raw(_) => None,
        }
    }
}
