// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for gapi-sheets integration tests
//!
//! Every test runs against a local wiremock server that mimics the Drive,
//! Sheets and Apps Script endpoints under Google's path layout.

#![allow(dead_code)]

use gapi_sheets::{GapiConfig, GoogleApi, Spreadsheet};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SPREADSHEET_ID: &str = "sid-budget";
pub const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Client pointed at `server` with the test configuration
pub fn api_for(server: &MockServer) -> GoogleApi {
    api_with_config(GapiConfig::minimal().with_base_url(&server.uri()))
}

/// Client with a custom configuration
pub fn api_with_config(config: GapiConfig) -> GoogleApi {
    GoogleApi::with_token(config, "test-token").expect("client builds")
}

/// A Drive file resource
pub fn file(id: &str, name: &str, mime_type: &str) -> Value {
    json!({ "kind": "drive#file", "id": id, "name": name, "mimeType": mime_type })
}

/// Spreadsheet metadata with `(title, sheet_id, rows, columns)` sheets
pub fn spreadsheet_meta(sheets: &[(&str, i64, u32, u32)]) -> Value {
    let sheets: Vec<Value> = sheets
        .iter()
        .enumerate()
        .map(|(index, (title, sheet_id, rows, columns))| {
            json!({
                "properties": {
                    "sheetId": sheet_id,
                    "title": title,
                    "index": index,
                    "gridProperties": { "rowCount": rows, "columnCount": columns }
                }
            })
        })
        .collect();
    json!({
        "spreadsheetId": SPREADSHEET_ID,
        "properties": { "title": "Budget" },
        "sheets": sheets
    })
}

/// Serves a single-page file listing for the caller's own drive
pub async fn mount_files(server: &MockServer, files: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": files })))
        .mount(server)
        .await;
}

/// Serves metadata for the `Budget` spreadsheet
pub async fn mount_metadata(server: &MockServer, metadata: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(metadata))
        .mount(server)
        .await;
}

/// Mounts a listing containing `Budget` plus metadata, then opens it
pub async fn open_budget(server: &MockServer, sheets: &[(&str, i64, u32, u32)]) -> Spreadsheet {
    mount_files(
        server,
        vec![
            file(SPREADSHEET_ID, "Budget", SPREADSHEET_MIME),
            file("doc-1", "Notes", "application/vnd.google-apps.document"),
        ],
    )
    .await;
    mount_metadata(server, spreadsheet_meta(sheets)).await;

    api_for(server)
        .open_spreadsheet("Budget")
        .await
        .expect("Budget opens")
}

/// Path of a values call on the `Budget` spreadsheet
pub fn values_path(range: &str) -> String {
    format!("/v4/spreadsheets/{SPREADSHEET_ID}/values/{range}")
}
