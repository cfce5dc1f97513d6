// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use async_trait::async_trait;
use bytes::Bytes;
use capella_rest_core::hash::base64_encode;
use capella_rest_core::utils::Redact;
use capella_rest_core::{Context, Credential, Error, RefreshToken, Result};
use http::header::{ACCEPT, AUTHORIZATION};
use http::HeaderValue;
use log::debug;
use serde::Deserialize;

use crate::constants::SESSIONS_PATH;

/// SessionTokenRefresher logs in with username and password to obtain a
/// new session token.
///
/// The login is a `POST /sessions` with HTTP Basic authentication; the
/// control plane answers with the token in the `jwt` field.
#[derive(Debug, Clone)]
pub struct SessionTokenRefresher {
    base_url: String,
}

impl SessionTokenRefresher {
    /// Create a refresher logging in against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct SessionResponse {
    jwt: String,
}

#[async_trait]
impl RefreshToken for SessionTokenRefresher {
    async fn refresh_token(&self, ctx: &Context, credential: &Credential) -> Result<String> {
        let (Some(username), Some(password)) = (&credential.username, &credential.password)
        else {
            return Err(Error::config_invalid(
                "username and password are required to refresh the session token",
            ));
        };

        let url = format!("{}{SESSIONS_PATH}", self.base_url);
        let basic = base64_encode(format!("{username}:{password}").as_bytes());
        let mut auth: HeaderValue = format!("Basic {basic}").parse()?;
        auth.set_sensitive(true);

        let req = http::Request::post(&url)
            .header(AUTHORIZATION, auth)
            .header(ACCEPT, "application/json")
            .body(Bytes::new())?;

        debug!("logging in as {username} at {url}");
        let resp = ctx.http_send_as_string(req).await?;
        if !resp.status().is_success() {
            return Err(Error::unexpected(format!(
                "login at {url} failed with status {}: {}",
                resp.status(),
                resp.body()
            )));
        }

        let session: SessionResponse = serde_json::from_str(resp.body()).map_err(|e| {
            Error::unexpected("login response does not carry a session token").with_source(e)
        })?;
        debug!("session token obtained: {:?}", Redact::from(&session.jwt));
        Ok(session.jwt)
    }
}
