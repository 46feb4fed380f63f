// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Drive operations: listing, scope selection and copying files.
//!
//! File and team-drive listings are served from the client's timed caches.
//! Switching scope always invalidates the file listing so the next read
//! reflects the new drive.

use serde_json::json;
use tracing::{debug, info, Instrument};

use crate::client::GoogleApi;
use crate::config::constants::SPREADSHEET_MIME_TYPE;
use crate::errors::{DriveError, RequestError};
use crate::spans;
use crate::transport::ApiRequest;
use crate::types::drive::{DriveScope, FileMeta, FilePage, TeamDrive, TeamDrivePage};

impl GoogleApi {
    /// Names of all files in the active scope
    pub async fn files(&self) -> Result<Vec<String>, DriveError> {
        Ok(self
            .file_list()
            .await?
            .into_iter()
            .map(|file| file.name)
            .collect())
    }

    /// Every file in the active scope, served from cache while fresh
    pub async fn file_list(&self) -> Result<Vec<FileMeta>, DriveError> {
        let scope = self.scope().await;
        let files = self
            .inner
            .files
            .get_or_fetch(&scope, || self.fetch_files(&scope))
            .await?;
        Ok(files)
    }

    /// Lists the active scope from the server, bypassing the cache
    pub async fn refresh_files(&self) -> Result<Vec<FileMeta>, DriveError> {
        let scope = self.scope().await;
        self.inner.files.invalidate(&scope).await;
        self.file_list().await
    }

    /// Names of the spreadsheets in the active scope
    pub async fn spreadsheets(&self) -> Result<Vec<String>, DriveError> {
        Ok(self
            .file_list()
            .await?
            .into_iter()
            .filter(|file| file.mime_type == SPREADSHEET_MIME_TYPE)
            .map(|file| file.name)
            .collect())
    }

    /// Names of the team drives visible to the caller
    pub async fn team_drives(&self) -> Result<Vec<String>, DriveError> {
        Ok(self
            .team_drive_list()
            .await?
            .into_iter()
            .map(|drive| drive.name)
            .collect())
    }

    /// Team drives visible to the caller, served from cache while fresh
    pub async fn team_drive_list(&self) -> Result<Vec<TeamDrive>, DriveError> {
        let drives = self
            .inner
            .team_drives
            .get_or_fetch(&(), || self.fetch_team_drives())
            .await?;
        Ok(drives)
    }

    /// Makes the named team drive the active scope
    pub async fn open_team_drive(&self, name: &str) -> Result<TeamDrive, DriveError> {
        async move {
            let drive = self
                .team_drive_list()
                .await?
                .into_iter()
                .find(|drive| drive.name == name)
                .ok_or_else(|| DriveError::TeamDriveNotFound {
                    name: name.to_string(),
                })?;

            self.switch_scope(DriveScope::TeamDrive(drive.clone())).await;
            Ok(drive)
        }
        .instrument(spans::open_scope(name))
        .await
    }

    /// Makes the caller's own drive the active scope
    pub async fn open_my_drive(&self) {
        self.switch_scope(DriveScope::MyDrive)
            .instrument(spans::open_scope("my-drive"))
            .await;
    }

    /// Id of the named file in the active scope
    pub async fn file_id(&self, name: &str) -> Result<String, DriveError> {
        Ok(self.file(name).await?.id)
    }

    /// Metadata of the named file in the active scope
    pub async fn file(&self, name: &str) -> Result<FileMeta, DriveError> {
        self.file_list()
            .await?
            .into_iter()
            .find(|file| file.name == name)
            .ok_or_else(|| DriveError::file_not_found(name))
    }

    /// Copies `origin` to a new file called `new_name` in the active scope
    ///
    /// Fails with [`DriveError::FileNotFound`] if `origin` does not exist and
    /// [`DriveError::FileAlreadyExists`] if `new_name` does.
    pub async fn copy_file(&self, origin: &str, new_name: &str) -> Result<FileMeta, DriveError> {
        async move {
            let files = self.file_list().await?;
            let source = files
                .iter()
                .find(|file| file.name == origin)
                .ok_or_else(|| DriveError::file_not_found(origin))?;
            if files.iter().any(|file| file.name == new_name) {
                return Err(DriveError::FileAlreadyExists {
                    name: new_name.to_string(),
                });
            }

            let in_team_drive = self.scope().await.is_team_drive();
            let copy = self.post_copy(&source.id, new_name, in_team_drive).await?;

            let scope = self.scope().await;
            self.inner.files.invalidate(&scope).await;
            info!(id = %copy.id, "Copied file");
            Ok(copy)
        }
        .instrument(spans::copy_file(origin, new_name))
        .await
    }

    async fn switch_scope(&self, scope: DriveScope) {
        let previous = {
            let mut active = self.inner.scope.lock().await;
            std::mem::replace(&mut *active, scope.clone())
        };
        self.inner.files.invalidate(&previous).await;
        self.inner.files.invalidate(&scope).await;
        info!(from = %previous, to = %scope, "Switched drive scope");
    }

    async fn post_copy(
        &self,
        file_id: &str,
        new_name: &str,
        in_team_drive: bool,
    ) -> Result<FileMeta, RequestError> {
        let request = ApiRequest::post(self.endpoints().file_copy(file_id)?)
            .query("supportsTeamDrives", in_team_drive)
            .json(&json!({ "name": new_name }))?;
        self.send_json(request).await
    }

    async fn fetch_files(&self, scope: &DriveScope) -> Result<Vec<FileMeta>, RequestError> {
        let page_size = self.config().page_size;
        async move {
            let url = self.endpoints().files()?;
            let mut files = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut request = ApiRequest::get(url.clone()).query("pageSize", page_size);
                if let DriveScope::TeamDrive(drive) = scope {
                    request = request
                        .query("corpora", "teamDrive")
                        .query("includeTeamDriveItems", true)
                        .query("supportsTeamDrives", true)
                        .query("teamDriveId", &drive.id);
                }
                if let Some(token) = &page_token {
                    request = request.query("pageToken", token);
                }

                let page: FilePage = self.send_json(request).await?;
                files.extend(page.files);

                match page.next_page_token {
                    Some(token) if !token.is_empty() => page_token = Some(token),
                    _ => break,
                }
            }

            debug!(count = files.len(), "Listed files");
            Ok(files)
        }
        .instrument(spans::list_files(scope, page_size))
        .await
    }

    async fn fetch_team_drives(&self) -> Result<Vec<TeamDrive>, RequestError> {
        async move {
            let url = self.endpoints().team_drives()?;
            let mut drives = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut request = ApiRequest::get(url.clone());
                if let Some(token) = &page_token {
                    request = request.query("pageToken", token);
                }

                let page: TeamDrivePage = self.send_json(request).await?;
                drives.extend(page.team_drives);

                match page.next_page_token {
                    Some(token) if !token.is_empty() => page_token = Some(token),
                    _ => break,
                }
            }

            debug!(count = drives.len(), "Listed team drives");
            Ok(drives)
        }
        .instrument(spans::list_team_drives())
        .await
    }
}
