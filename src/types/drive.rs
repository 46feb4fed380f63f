// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Drive v3 resources

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::constants::SPREADSHEET_MIME_TYPE;

/// A Drive `files` resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// Drive file id
    pub id: String,
    /// Display name
    pub name: String,
    /// Mime type; Google documents use `application/vnd.google-apps.*`
    #[serde(default)]
    pub mime_type: String,
    /// Last modification time, when the listing included it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
}

impl FileMeta {
    /// Whether this file is a Google Sheets document
    pub fn is_spreadsheet(&self) -> bool {
        self.mime_type == SPREADSHEET_MIME_TYPE
    }
}

/// One page of a `files.list` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FilePage {
    #[serde(default)]
    pub files: Vec<FileMeta>,
    pub next_page_token: Option<String>,
}

/// A Drive `teamdrives` resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamDrive {
    /// Team drive id
    pub id: String,
    /// Display name
    pub name: String,
}

/// One page of a `teamdrives.list` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamDrivePage {
    #[serde(default)]
    pub team_drives: Vec<TeamDrive>,
    pub next_page_token: Option<String>,
}

/// The container files are listed from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DriveScope {
    /// The caller's own drive
    #[default]
    MyDrive,
    /// A shared (team) drive
    TeamDrive(TeamDrive),
}

impl DriveScope {
    /// Whether this scope is a team drive
    pub fn is_team_drive(&self) -> bool {
        matches!(self, DriveScope::TeamDrive(_))
    }
}

impl fmt::Display for DriveScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveScope::MyDrive => f.write_str("my-drive"),
            DriveScope::TeamDrive(drive) => write!(f, "team-drive:{}", drive.id),
        }
    }
}
