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

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use capella_rest_core::utils::Redact;
use capella_rest_core::{Context, Credential, Error, Result};
use log::warn;

use crate::constants::*;

/// Config carries all the configuration needed to reach the control plane.
#[derive(Clone, Default)]
pub struct Config {
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CAPELLA_BASE_URL`]
    pub base_url: Option<String>,
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CAPELLA_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CAPELLA_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `bearer_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CAPELLA_BEARER_TOKEN`]
    pub bearer_token: Option<String>,
    /// `username` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CAPELLA_USERNAME`]
    pub username: Option<String>,
    /// `password` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CAPELLA_PASSWORD`]
    pub password: Option<String>,
    /// `timeout` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CAPELLA_TIMEOUT_SECS`], in whole seconds
    pub timeout: Option<Duration>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set access_key and secret_key
    pub fn with_key_pair(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set bearer_token
    pub fn with_bearer_token(mut self, bearer_token: impl Into<String>) -> Self {
        self.bearer_token = Some(bearer_token.into());
        self
    }

    /// Set username and password
    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(CAPELLA_BASE_URL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CAPELLA_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CAPELLA_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CAPELLA_BEARER_TOKEN) {
            self.bearer_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CAPELLA_USERNAME) {
            self.username.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CAPELLA_PASSWORD) {
            self.password.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CAPELLA_TIMEOUT_SECS) {
            match v.trim().parse::<u64>() {
                Ok(secs) => {
                    self.timeout.get_or_insert(Duration::from_secs(secs));
                }
                Err(_) => warn!("ignoring {CAPELLA_TIMEOUT_SECS}={v:?}: not a number of seconds"),
            }
        }

        self
    }

    /// The configured base url.
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](capella_rest_core::ErrorKind::ConfigInvalid)
    /// if it's missing or not an absolute http(s) url.
    pub fn base_url(&self) -> Result<&str> {
        let url = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("base url is not configured"))?;

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(Error::config_invalid(format!(
                "base url {url:?} must start with http:// or https://"
            )));
        }
        Ok(url)
    }

    /// Check if a username and password are configured.
    pub fn has_login(&self) -> bool {
        matches!((&self.username, &self.password), (Some(u), Some(p)) if !u.is_empty() && !p.is_empty())
    }

    /// Build the credential described by this config.
    pub fn credential(&self) -> Credential {
        Credential {
            access_key: self.access_key.clone().unwrap_or_default(),
            secret_key: self.secret_key.clone().unwrap_or_default(),
            bearer_token: self.bearer_token.clone().filter(|v| !v.is_empty()),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("bearer_token", &self.bearer_token.as_ref().map(Redact::from))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(Redact::from))
            .field("timeout", &self.timeout)
            .finish()
    }
}
