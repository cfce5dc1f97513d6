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
use capella_rest_core::{Context, Credential, Error, RefreshToken, Result};
use log::debug;

use crate::constants::CAPELLA_BEARER_TOKEN;

/// EnvTokenRefresher re-reads the bearer token from the environment.
///
/// This is useful when the token is rotated by an outside process that
/// updates `CAPELLA_BEARER_TOKEN`.
#[derive(Debug, Default)]
pub struct EnvTokenRefresher;

impl EnvTokenRefresher {
    /// Create a new EnvTokenRefresher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RefreshToken for EnvTokenRefresher {
    async fn refresh_token(&self, ctx: &Context, credential: &Credential) -> Result<String> {
        let token = ctx
            .env_var(CAPELLA_BEARER_TOKEN)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::config_invalid(format!("{CAPELLA_BEARER_TOKEN} is not set"))
            })?;

        if credential.bearer_token() == Some(token.as_str()) {
            debug!("{CAPELLA_BEARER_TOKEN} still holds the rejected token");
        }
        Ok(token)
    }
}
