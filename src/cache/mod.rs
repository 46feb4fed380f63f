// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Metadata caching with timed and forced invalidation.
//!
//! File listings, team-drive listings and opened spreadsheet schemas change
//! slowly but are needed on almost every call. [`TimedCache`] keeps them for a
//! fixed window so repeated reads skip the network, while guaranteeing a value
//! is never served once its window has elapsed.
//!
//! Each key moves through a small state machine:
//!
//! ```text
//!            fetch                 window elapses
//!   Empty ───────────▶ Fresh ─────────────────────▶ Stale
//!     ▲                  ▲                            │
//!     │ invalidate       └──────── fetch ─────────────┘
//!     └──────────────── (from any state)
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use gapi_sheets::cache::TimedCache;
//! use std::time::Duration;
//!
//! let cache: TimedCache<String, Vec<String>> = TimedCache::new("files", Duration::from_secs(5));
//!
//! let files = cache
//!     .get_or_fetch(&"my-drive".to_string(), || async { list_files().await })
//!     .await?;
//!
//! // Switching drives must not serve the old listing
//! cache.invalidate(&"my-drive".to_string()).await;
//! ```

mod timed;
mod types;

pub use timed::{CacheEntry, TimedCache};
pub use types::{CacheState, CacheStats};
