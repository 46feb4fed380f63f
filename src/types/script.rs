// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Apps Script v1 `scripts.run` request and response

use serde::{Deserialize, Serialize};

/// Body of a `scripts.run` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    /// Name of the function to run
    pub function: String,
    /// Positional arguments
    pub parameters: Vec<serde_json::Value>,
    /// Run the most recently saved code instead of the deployed version
    pub dev_mode: bool,
}

/// An Apps Script `Operation`
///
/// Exactly one of `response` and `error` is set once `done` is true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptResponse {
    /// Whether the execution finished
    #[serde(default)]
    pub done: bool,
    /// Successful result, `{"@type": ..., "result": ...}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
    /// Failure details, `{"code": ..., "message": ..., "details": [...]}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl ScriptResponse {
    /// The function's return value, if it completed successfully
    pub fn result(&self) -> Option<&serde_json::Value> {
        self.response.as_ref().and_then(|r| r.get("result"))
    }
}
