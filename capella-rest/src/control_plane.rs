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

//! Capella control plane support with convenience APIs

pub use capella_rest_control_plane::*;

use capella_rest_core::{Context, CredentialStore, Dispatcher, Result};
use log::debug;

/// Build a dispatcher for `config` on top of `ctx`.
///
/// The dispatcher signs with [`RequestSigner`] and treats a
/// [`TokenExpired`] reply as an expired bearer token. The token refresher is
/// picked from the config:
///
/// - username and password: [`SessionTokenRefresher`] logs in again.
/// - bearer token only: [`EnvTokenRefresher`] reads `CAPELLA_BEARER_TOKEN` again.
/// - access/secret key pair: no refresher.
///
/// Returns [`ErrorKind::ConfigInvalid`](capella_rest_core::ErrorKind::ConfigInvalid)
/// if the base url is missing or invalid.
pub fn dispatcher_with_context(ctx: Context, config: &Config) -> Result<Dispatcher> {
    let base_url = config.base_url()?.to_string();
    let store = CredentialStore::new(config.credential());

    let mut dispatcher = Dispatcher::new(ctx, base_url.as_str(), store, RequestSigner::new())
        .with_auth_expiry(TokenExpired);

    if config.has_login() {
        debug!("bearer token will be refreshed by logging in at {base_url}");
        dispatcher = dispatcher.with_token_refresher(SessionTokenRefresher::new(base_url));
    } else if config.bearer_token.as_deref().is_some_and(|v| !v.is_empty()) {
        debug!("bearer token will be refreshed from {}", constants::CAPELLA_BEARER_TOKEN);
        dispatcher = dispatcher.with_token_refresher(EnvTokenRefresher::new());
    }

    if let Some(timeout) = config.timeout {
        dispatcher = dispatcher.with_timeout(timeout);
    }

    Ok(dispatcher)
}

/// Build a dispatcher for `config` with the default context.
///
/// ```no_run
/// # fn example() -> capella_rest::Result<()> {
/// use capella_rest::control_plane::{default_dispatcher, Config};
///
/// let config = Config::new()
///     .with_base_url("https://cloudapi.cloud.couchbase.com")
///     .with_key_pair("my-access-key", "my-secret-key");
/// let dispatcher = default_dispatcher(&config)?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_dispatcher(config: &Config) -> Result<Dispatcher> {
    dispatcher_with_context(crate::default_context(), config)
}

/// Build a dispatcher from `CAPELLA_*` env values with the default context.
#[cfg(feature = "default-context")]
pub fn dispatcher_from_env() -> Result<Dispatcher> {
    let ctx = crate::default_context();
    let config = Config::new().from_env(&ctx);
    dispatcher_with_context(ctx, &config)
}
