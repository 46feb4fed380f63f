// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Apps Script execution.

use tracing::{debug, Instrument};

use crate::client::GoogleApi;
use crate::errors::{RequestError, ScriptError};
use crate::spans;
use crate::transport::ApiRequest;
use crate::types::script::{ScriptRequest, ScriptResponse};

impl GoogleApi {
    /// Runs `function` of the Apps Script project `script_id`
    ///
    /// A script that throws still answers 200; inspect
    /// [`ScriptResponse::error`] for the failure.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = api
    ///     .run_script("1AbC...", "archiveMonth", vec!["2024-03".into()], false)
    ///     .await?;
    /// println!("{:?}", response.result());
    /// ```
    pub async fn run_script(
        &self,
        script_id: &str,
        function: &str,
        parameters: Vec<serde_json::Value>,
        dev_mode: bool,
    ) -> Result<ScriptResponse, ScriptError> {
        if script_id.is_empty() {
            return Err(ScriptError::InvalidCall {
                reason: "script id is empty".to_string(),
            });
        }
        if function.is_empty() {
            return Err(ScriptError::InvalidCall {
                reason: "function name is empty".to_string(),
            });
        }

        let body = ScriptRequest {
            function: function.to_string(),
            parameters,
            dev_mode,
        };
        let response = self
            .post_script(script_id, &body)
            .instrument(spans::run_script(script_id, function, dev_mode))
            .await?;
        debug!(done = response.done, failed = response.error.is_some(), "Script finished");
        Ok(response)
    }

    async fn post_script(
        &self,
        script_id: &str,
        body: &ScriptRequest,
    ) -> Result<ScriptResponse, RequestError> {
        let request = ApiRequest::post(self.endpoints().script_run(script_id)?).json(body)?;
        self.send_json(request).await
    }
}
