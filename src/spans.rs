//! Span creation helpers for gapi-sheets operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a helper here and attaches the
//! span with [`tracing::Instrument`].
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, name: &str) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(name))
//!     .await
//! }
//! ```

use tracing::Span;

use crate::types::drive::DriveScope;

/// Span for a forced Drive listing.
///
/// Parent: caller, or `files` when the cache was stale
/// Children: one `gapi_request` span per page
#[inline]
pub(crate) fn list_files(scope: &DriveScope, page_size: u32) -> Span {
    tracing::debug_span!("gapi.list_files", scope = %scope, page_size = page_size)
}

/// Span for listing team drives.
#[inline]
pub(crate) fn list_team_drives() -> Span {
    tracing::debug_span!("gapi.list_team_drives")
}

/// Span for switching the active drive scope.
#[inline]
pub(crate) fn open_scope(target: &str) -> Span {
    tracing::info_span!("gapi.open_scope", target = target)
}

/// Span for copying a Drive file.
#[inline]
pub(crate) fn copy_file(origin: &str, new_name: &str) -> Span {
    tracing::info_span!("gapi.copy_file", origin = origin, new_name = new_name)
}

/// Span for opening a spreadsheet by name.
///
/// Parent: None (root span for this operation)
/// Children: Drive listing when stale, metadata fetch
#[inline]
pub(crate) fn open_spreadsheet(name: &str) -> Span {
    tracing::info_span!("gapi.open_spreadsheet", name = name)
}

/// Span for fetching spreadsheet metadata.
#[inline]
pub(crate) fn fetch_metadata(spreadsheet_id: &str) -> Span {
    tracing::debug_span!("gapi.fetch_metadata", spreadsheet_id = spreadsheet_id)
}

/// Span for a `batchUpdate` that adds or deletes a sheet.
#[inline]
pub(crate) fn batch_update(spreadsheet_id: &str, operation: &'static str, title: &str) -> Span {
    tracing::info_span!(
        "gapi.batch_update",
        spreadsheet_id = spreadsheet_id,
        operation = operation,
        title = title,
    )
}

/// Span for a values call (get, update, append, clear).
///
/// Parent: Sheet or Row operation, if any
/// Children: `gapi_request` spans (one per attempt)
#[inline]
pub(crate) fn values(spreadsheet_id: &str, operation: &'static str, range: &str) -> Span {
    tracing::debug_span!(
        "gapi.values",
        spreadsheet_id = spreadsheet_id,
        operation = operation,
        range = range,
    )
}

/// Span for an Apps Script execution.
#[inline]
pub(crate) fn run_script(script_id: &str, function: &str, dev_mode: bool) -> Span {
    tracing::info_span!(
        "gapi.run_script",
        script_id = script_id,
        function = function,
        dev_mode = dev_mode,
    )
}
