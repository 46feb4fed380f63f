// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Wire types for the Drive, Sheets and Apps Script APIs.
//!
//! Field names follow Google's camelCase JSON; unknown fields are ignored so
//! new server-side fields never break decoding.
//! - Drive files, file pages and team drives
//! - Spreadsheet metadata, value ranges and batch-update responses
//! - Apps Script run requests and responses

pub mod drive;
pub mod script;
pub mod sheets;

// Note: Public types are re-exported from lib.rs, not here
