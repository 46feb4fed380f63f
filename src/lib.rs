// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # gapi-sheets
//!
//! An async client for Google Drive, Google Sheets and Apps Script.
//!
//! - **Drive**: list files and team drives, switch scope, copy files
//! - **Sheets**: open spreadsheets by name, read and write ranges, add and
//!   delete sheets, index rows from either end
//! - **Apps Script**: run a deployed function
//!
//! Transient failures (HTTP 500, 503, 504, 429, 408 and connection errors)
//! are retried according to a [`RetryPolicy`]. Listings and spreadsheet
//! metadata are cached for a short window so chains of calls do not refetch.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use gapi_sheets::{GapiConfig, GoogleApi};
//!
//! let api = GoogleApi::with_token(GapiConfig::default(), token)?;
//!
//! let spreadsheet = api.open_spreadsheet("Budget").await?;
//! let sheet = spreadsheet.sheet("2024").await?;
//! let rows = sheet.get_range("A1:C10").await?;
//! sheet.append_row("A1", vec!["total".into(), 1200.into()]).await?;
//! ```
//!
//! ## Modules
//!
//! - [`a1`]: A1 notation codec
//! - [`cache`]: timed metadata cache
//! - [`config`]: client configuration and defaults
//! - [`errors`]: error types
//! - [`sheets`]: spreadsheet, sheet and row handles
//! - [`transport`]: tower request stack (retry, logging, HTTP)
//! - [`types`]: wire types

pub mod a1;
pub mod auth;
pub mod cache;
mod client;
pub mod config;
mod drive;
pub mod errors;
mod script;
pub mod sheets;
mod spans;
pub mod transport;
pub mod types;

pub use auth::{AccessToken, StaticToken, TokenError, TokenProvider};
pub use cache::{CacheState, CacheStats};
pub use client::GoogleApi;
pub use config::{ApiEndpoints, GapiConfig, GapiConfigBuilder};
pub use errors::{
    AddressError, DriveError, GapiError, RequestError, ScriptError, SpreadsheetError,
    TransportError,
};
pub use sheets::{Row, Sheet, Spreadsheet};
pub use transport::{Backoff, RetryPolicy};
pub use types::drive::{DriveScope, FileMeta, TeamDrive};
pub use types::script::{ScriptRequest, ScriptResponse};
pub use types::sheets::{
    AppendOutcome, CellValue, GridProperties, SheetProperties, SpreadsheetMeta, ValueRange,
};
