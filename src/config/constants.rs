//! Well-known endpoints and constants
//!
//! This module centralizes Google API base URLs, wire constants and the
//! defaults used throughout the crate.

use std::time::Duration;

/// Base URL of the Drive v3 API
pub const DRIVE_API: &str = "https://www.googleapis.com/drive/v3";

/// Base URL of the Sheets v4 API
pub const SHEETS_API: &str = "https://sheets.googleapis.com/v4";

/// Base URL of the Apps Script v1 API
pub const SCRIPT_API: &str = "https://script.googleapis.com/v1";

/// Drive mime type of a Google Sheets document
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// HTTP statuses treated as transient: 500, 503, 504, 429 and 408
pub const RETRYABLE_STATUS_CODES: [u16; 5] = [500, 503, 504, 429, 408];

/// How long listings and opened spreadsheet metadata stay fresh
pub const DEFAULT_CACHE_WINDOW: Duration = Duration::from_secs(5);

/// Pause between attempts of a transient failure
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Deadline for a single HTTP request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for establishing a connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Items requested per Drive listing page
pub const DRIVE_PAGE_SIZE: u32 = 1000;

/// Grid size of a freshly added sheet
pub const NEW_SHEET_ROWS: u32 = 1;
/// Grid size of a freshly added sheet
pub const NEW_SHEET_COLUMNS: u32 = 3;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("gapi-sheets/", env!("CARGO_PKG_VERSION"));
