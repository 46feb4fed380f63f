//! URL construction for the Drive, Sheets and Script endpoints

use url::Url;

use super::constants::{DRIVE_API, SCRIPT_API, SHEETS_API};
use crate::errors::TransportError;

/// Base URLs of the three Google APIs
///
/// Overriding them points the client at another server, which is how the
/// integration tests run against a local mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// Drive v3 base URL
    pub drive: String,
    /// Sheets v4 base URL
    pub sheets: String,
    /// Apps Script v1 base URL
    pub script: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            drive: DRIVE_API.to_string(),
            sheets: SHEETS_API.to_string(),
            script: SCRIPT_API.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Points every API at the same server, keeping the Google path layout
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            drive: format!("{base}/drive/v3"),
            sheets: format!("{base}/v4"),
            script: format!("{base}/v1"),
        }
    }

    /// `drive/v3/files`
    pub fn files(&self) -> Result<Url, TransportError> {
        join(&self.drive, &["files"])
    }

    /// `drive/v3/files/{id}/copy`
    pub fn file_copy(&self, file_id: &str) -> Result<Url, TransportError> {
        join(&self.drive, &["files", file_id, "copy"])
    }

    /// `drive/v3/teamdrives`
    pub fn team_drives(&self) -> Result<Url, TransportError> {
        join(&self.drive, &["teamdrives"])
    }

    /// `v4/spreadsheets/{id}`
    pub fn spreadsheet(&self, spreadsheet_id: &str) -> Result<Url, TransportError> {
        join(&self.sheets, &["spreadsheets", spreadsheet_id])
    }

    /// `v4/spreadsheets/{id}:batchUpdate`
    pub fn batch_update(&self, spreadsheet_id: &str) -> Result<Url, TransportError> {
        join(
            &self.sheets,
            &["spreadsheets", &format!("{spreadsheet_id}:batchUpdate")],
        )
    }

    /// `v4/spreadsheets/{id}/values/{range}`
    pub fn values(&self, spreadsheet_id: &str, range: &str) -> Result<Url, TransportError> {
        join(&self.sheets, &["spreadsheets", spreadsheet_id, "values", range])
    }

    /// `v4/spreadsheets/{id}/values/{range}:append`
    pub fn values_append(&self, spreadsheet_id: &str, range: &str) -> Result<Url, TransportError> {
        join(
            &self.sheets,
            &["spreadsheets", spreadsheet_id, "values", &format!("{range}:append")],
        )
    }

    /// `v4/spreadsheets/{id}/values/{range}:clear`
    pub fn values_clear(&self, spreadsheet_id: &str, range: &str) -> Result<Url, TransportError> {
        join(
            &self.sheets,
            &["spreadsheets", spreadsheet_id, "values", &format!("{range}:clear")],
        )
    }

    /// `v1/scripts/{id}:run`
    pub fn script_run(&self, script_id: &str) -> Result<Url, TransportError> {
        join(&self.script, &["scripts", &format!("{script_id}:run")])
    }
}

/// Appends percent-encoded path segments to a base URL
fn join(base: &str, segments: &[&str]) -> Result<Url, TransportError> {
    let mut url = Url::parse(base).map_err(|e| TransportError::InvalidRequest {
        reason: format!("invalid base URL '{base}': {e}"),
    })?;
    url.path_segments_mut()
        .map_err(|()| TransportError::InvalidRequest {
            reason: format!("base URL '{base}' cannot take path segments"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = ApiEndpoints::default();
        assert_eq!(
            endpoints.files().unwrap().as_str(),
            "https://www.googleapis.com/drive/v3/files"
        );
        assert_eq!(
            endpoints.file_copy("abc").unwrap().as_str(),
            "https://www.googleapis.com/drive/v3/files/abc/copy"
        );
        assert_eq!(
            endpoints.batch_update("sid").unwrap().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sid:batchUpdate"
        );
        assert_eq!(
            endpoints.script_run("scr").unwrap().as_str(),
            "https://script.googleapis.com/v1/scripts/scr:run"
        );
    }

    #[test]
    fn test_values_range_is_encoded_as_one_segment() {
        let endpoints = ApiEndpoints::default();
        assert_eq!(
            endpoints.values("sid", "Sheet1!A1:C3").unwrap().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sid/values/Sheet1!A1:C3"
        );
        assert_eq!(
            endpoints.values_append("sid", "My Sheet!A1").unwrap().path(),
            "/v4/spreadsheets/sid/values/My%20Sheet!A1:append"
        );
        assert_eq!(
            endpoints.values("sid", "a/b!A1").unwrap().path(),
            "/v4/spreadsheets/sid/values/a%2Fb!A1"
        );
    }

    #[test]
    fn test_with_base_trims_trailing_slash() {
        let endpoints = ApiEndpoints::with_base("http://127.0.0.1:9000/");
        assert_eq!(
            endpoints.team_drives().unwrap().as_str(),
            "http://127.0.0.1:9000/drive/v3/teamdrives"
        );
        assert_eq!(
            endpoints.values_clear("sid", "A1").unwrap().as_str(),
            "http://127.0.0.1:9000/v4/spreadsheets/sid/values/A1:clear"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let endpoints = ApiEndpoints {
            drive: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            endpoints.files(),
            Err(TransportError::InvalidRequest { .. })
        ));
    }
}
