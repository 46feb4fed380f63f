// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, Instrument};

use super::Sheet;
use crate::a1::{encode_cell, quote_sheet_name, split_sheet};
use crate::client::GoogleApi;
use crate::config::constants::{NEW_SHEET_COLUMNS, NEW_SHEET_ROWS};
use crate::errors::{RequestError, SpreadsheetError};
use crate::spans;
use crate::transport::ApiRequest;
use crate::types::drive::FileMeta;
use crate::types::sheets::{
    AppendOutcome, BatchUpdateResponse, CellValue, SheetProperties, SpreadsheetMeta,
    UpdateValuesResponse, ValueRange,
};

/// An opened spreadsheet
///
/// Clones share the open-sheet state. Metadata lives in the client's
/// spreadsheet cache and is refetched once the cache window has passed.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    api: GoogleApi,
    file: FileMeta,
    open_sheet: Arc<Mutex<Option<String>>>,
}

/// `GET spreadsheets/{id}`
pub(super) async fn fetch_metadata(
    api: &GoogleApi,
    spreadsheet_id: &str,
) -> Result<SpreadsheetMeta, RequestError> {
    let request = ApiRequest::get(api.endpoints().spreadsheet(spreadsheet_id)?);
    api.send_json(request)
        .instrument(spans::fetch_metadata(spreadsheet_id))
        .await
}

impl Spreadsheet {
    pub(super) fn new(api: GoogleApi, file: FileMeta) -> Self {
        Self {
            api,
            file,
            open_sheet: Arc::new(Mutex::new(None)),
        }
    }

    /// Drive name of the spreadsheet
    pub fn name(&self) -> &str {
        &self.file.name
    }

    /// Spreadsheet id (the Drive file id)
    pub fn id(&self) -> &str {
        &self.file.id
    }

    /// Drive metadata the spreadsheet was opened with
    pub fn file(&self) -> &FileMeta {
        &self.file
    }

    /// Client this spreadsheet was opened through
    pub fn api(&self) -> &GoogleApi {
        &self.api
    }

    /// Spreadsheet metadata, refetched when the cached copy is stale
    pub async fn metadata(&self) -> Result<SpreadsheetMeta, SpreadsheetError> {
        let metadata = self
            .api
            .inner
            .spreadsheets
            .get_or_fetch(&self.file.id, || fetch_metadata(&self.api, &self.file.id))
            .await?;
        Ok(metadata)
    }

    /// Drops the cached metadata and fetches it again
    pub async fn refresh_metadata(&self) -> Result<SpreadsheetMeta, SpreadsheetError> {
        self.api.inner.spreadsheets.invalidate(&self.file.id).await;
        self.metadata().await
    }

    /// Sheet titles in tab order
    pub async fn sheet_titles(&self) -> Result<Vec<String>, SpreadsheetError> {
        Ok(self.metadata().await?.titles())
    }

    /// Properties of the sheet called `title`
    pub async fn sheet_properties(&self, title: &str) -> Result<SheetProperties, SpreadsheetError> {
        self.metadata()
            .await?
            .sheet(title)
            .cloned()
            .ok_or_else(|| SpreadsheetError::sheet_not_found(self.name(), title))
    }

    /// Opens the sheet called `title` and returns a handle bound to it
    pub async fn sheet(&self, title: &str) -> Result<Sheet, SpreadsheetError> {
        self.open_sheet(title).await?;
        Ok(Sheet::new(self.clone(), title))
    }

    /// Makes `title` the sheet that bare ranges resolve against
    pub async fn open_sheet(&self, title: &str) -> Result<(), SpreadsheetError> {
        self.sheet_properties(title).await?;
        let mut open = self.open_sheet.lock().await;
        if open.as_deref() != Some(title) {
            debug!(spreadsheet = %self.name(), sheet = title, "Opened sheet");
            *open = Some(title.to_string());
        }
        Ok(())
    }

    /// Title of the currently open sheet, if any
    pub async fn open_sheet_title(&self) -> Option<String> {
        self.open_sheet.lock().await.clone()
    }

    /// Adds an empty sheet of 1 row by 3 columns
    pub async fn add_sheet(&self, title: &str) -> Result<SheetProperties, SpreadsheetError> {
        let body = json!({
            "includeSpreadsheetInResponse": true,
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": {
                            "rowCount": NEW_SHEET_ROWS,
                            "columnCount": NEW_SHEET_COLUMNS,
                        },
                    },
                },
            }],
        });
        self.batch_update(body)
            .instrument(spans::batch_update(self.id(), "addSheet", title))
            .await?;
        info!(spreadsheet = %self.name(), sheet = title, "Added sheet");
        self.sheet_properties(title).await
    }

    /// Deletes the sheet called `title`
    pub async fn delete_sheet(&self, title: &str) -> Result<(), SpreadsheetError> {
        let properties = self.sheet_properties(title).await?;
        let body = json!({
            "includeSpreadsheetInResponse": true,
            "requests": [{ "deleteSheet": { "sheetId": properties.sheet_id } }],
        });
        self.batch_update(body)
            .instrument(spans::batch_update(self.id(), "deleteSheet", title))
            .await?;

        let mut open = self.open_sheet.lock().await;
        if open.as_deref() == Some(title) {
            *open = None;
        }
        info!(spreadsheet = %self.name(), sheet = title, "Deleted sheet");
        Ok(())
    }

    /// Recreates `title` from scratch and appends `rows` starting at `A1`
    pub async fn replace_sheet(
        &self,
        title: &str,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Sheet, SpreadsheetError> {
        self.remove_sheet(title).await?;
        self.add_sheet(title).await?;
        let sheet = self.sheet(title).await?;
        if !rows.is_empty() {
            sheet.append_rows("A1", rows).await?;
        }
        Ok(sheet)
    }

    /// Deletes `title` if it exists; returns whether a sheet was deleted
    pub async fn remove_sheet(&self, title: &str) -> Result<bool, SpreadsheetError> {
        if self.metadata().await?.sheet(title).is_none() {
            return Ok(false);
        }
        self.delete_sheet(title).await?;
        Ok(true)
    }

    /// Resolves `range` against the open sheet
    ///
    /// A sheet-qualified range opens its sheet when `auto_open` is set or no
    /// sheet is open; otherwise it must name the open sheet. A bare range is
    /// prefixed with the open sheet, or passed through when none is open.
    pub async fn qualify_range(
        &self,
        range: &str,
        auto_open: bool,
    ) -> Result<String, SpreadsheetError> {
        let (sheet, cells) = split_sheet(range)?;
        let open = self.open_sheet_title().await;

        match (sheet, open) {
            (Some(requested), Some(open)) if !auto_open && requested != open => {
                Err(SpreadsheetError::SheetMismatch { requested, open })
            }
            (Some(requested), _) => {
                self.open_sheet(&requested).await?;
                Ok(range.to_string())
            }
            (None, Some(open)) => Ok(format!("{}!{cells}", quote_sheet_name(&open))),
            (None, None) => Ok(range.to_string()),
        }
    }

    /// Values in `range`; `[[]]` when the range is empty
    pub async fn get_range(&self, range: &str) -> Result<Vec<Vec<CellValue>>, SpreadsheetError> {
        let range = self.qualify_range(range, true).await?;
        let values = self
            .values_get(&range)
            .instrument(spans::values(self.id(), "get", &range))
            .await?;
        Ok(values.into_rows())
    }

    /// Writes `values` to `range` as if typed by a user
    ///
    /// Returns the values as stored after the write, or `[[]]`.
    pub async fn update_range(
        &self,
        range: &str,
        values: Vec<Vec<CellValue>>,
    ) -> Result<Vec<Vec<CellValue>>, SpreadsheetError> {
        let range = self.qualify_range(range, true).await?;
        let response = self
            .values_update(&range, values)
            .instrument(spans::values(self.id(), "update", &range))
            .await?;
        Ok(response
            .updated_data
            .map(ValueRange::into_rows)
            .unwrap_or_else(|| vec![Vec::new()]))
    }

    /// Appends rows after the table found at `range`
    pub async fn append_rows(
        &self,
        range: &str,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<AppendOutcome, SpreadsheetError> {
        let range = self.qualify_range(range, true).await?;
        let body = self
            .values_append(&range, rows)
            .instrument(spans::values(self.id(), "append", &range))
            .await?;
        Ok(AppendOutcome::from_response(body))
    }

    /// Appends a single row after the table found at `range`
    pub async fn append_row(
        &self,
        range: &str,
        row: Vec<CellValue>,
    ) -> Result<AppendOutcome, SpreadsheetError> {
        self.append_rows(range, vec![row]).await
    }

    /// Clears values (not formatting) in `range`
    pub async fn clear_range(&self, range: &str) -> Result<(), SpreadsheetError> {
        let range = self.qualify_range(range, true).await?;
        self.values_clear(&range)
            .instrument(spans::values(self.id(), "clear", &range))
            .await?;
        Ok(())
    }

    /// `(columns, rows)` of the sheet's grid
    pub async fn sheet_dimensions(&self, title: &str) -> Result<(u32, u32), SpreadsheetError> {
        Ok(self.sheet_properties(title).await?.dimensions())
    }

    /// Every value of the sheet's grid
    pub async fn sheet_values(&self, title: &str) -> Result<Vec<Vec<CellValue>>, SpreadsheetError> {
        let (columns, rows) = self.sheet_dimensions(title).await?;
        if columns == 0 || rows == 0 {
            return Ok(vec![Vec::new()]);
        }
        let range = format!(
            "{}!A1:{}",
            quote_sheet_name(title),
            encode_cell(columns, rows)?
        );
        self.get_range(&range).await
    }

    /// Sum of `columns * rows` over every sheet
    pub async fn total_cells(&self) -> Result<u64, SpreadsheetError> {
        Ok(self.metadata().await?.total_cells())
    }

    /// Sends a batch update and replaces the cached metadata with the
    /// spreadsheet returned by the server
    async fn batch_update(
        &self,
        body: serde_json::Value,
    ) -> Result<BatchUpdateResponse, SpreadsheetError> {
        let response = self.post_batch_update(&body).await?;
        let cache = &self.api.inner.spreadsheets;
        match &response.updated_spreadsheet {
            Some(updated) => cache.insert(self.file.id.clone(), updated.clone()).await,
            None => cache.invalidate(&self.file.id).await,
        }
        Ok(response)
    }

    async fn post_batch_update(
        &self,
        body: &serde_json::Value,
    ) -> Result<BatchUpdateResponse, RequestError> {
        let request = ApiRequest::post(self.api.endpoints().batch_update(self.id())?).json(body)?;
        self.api.send_json(request).await
    }

    async fn values_get(&self, range: &str) -> Result<ValueRange, RequestError> {
        let request = ApiRequest::get(self.api.endpoints().values(self.id(), range)?);
        self.api.send_json(request).await
    }

    async fn values_update(
        &self,
        range: &str,
        values: Vec<Vec<CellValue>>,
    ) -> Result<UpdateValuesResponse, RequestError> {
        let request = ApiRequest::put(self.api.endpoints().values(self.id(), range)?)
            .query("valueInputOption", "USER_ENTERED")
            .query("includeValuesInResponse", true)
            .json(&ValueRange::for_write(range, values))?;
        self.api.send_json(request).await
    }

    async fn values_append(
        &self,
        range: &str,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<serde_json::Value, RequestError> {
        let request = ApiRequest::post(self.api.endpoints().values_append(self.id(), range)?)
            .query("valueInputOption", "RAW")
            .query("insertDataOption", "INSERT_ROWS")
            .query("includeValuesInResponse", true)
            .json(&ValueRange::for_write(range, rows))?;
        self.api.send_json(request).await
    }

    async fn values_clear(&self, range: &str) -> Result<(), RequestError> {
        let request = ApiRequest::post(self.api.endpoints().values_clear(self.id(), range)?)
            .json(&json!({}))?;
        self.api.send(request).await?;
        Ok(())
    }
}
