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
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use log::{debug, warn};

use crate::{
    ApiRequest, Context, CredentialStore, DetectAuthExpiry, Error, RefreshToken, RequestTimeout,
    Response, Result, SignRequest, UnauthorizedStatus,
};

/// Dispatcher executes calls against the control plane.
///
/// Every call is signed with the credential currently held by the
/// [`CredentialStore`]. When a bearer authenticated call is rejected as
/// expired, the dispatcher refreshes the token once and retries once.
///
/// Clones share the same store, transport and refresher.
#[derive(Clone)]
pub struct Dispatcher {
    ctx: Context,
    base_url: String,
    store: CredentialStore,
    signer: Arc<dyn SignRequest>,
    refresher: Option<Arc<dyn RefreshToken>>,
    auth_expiry: Arc<dyn DetectAuthExpiry>,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl Debug for Dispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("ctx", &self.ctx)
            .field("base_url", &self.base_url)
            .field("store", &self.store)
            .field("signer", &self.signer)
            .field("refresher", &self.refresher)
            .field("timeout", &self.timeout)
            .field(
                "default_headers",
                &self.default_headers.keys().collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retry,
}

impl Dispatcher {
    /// Create a new dispatcher.
    ///
    /// `base_url` is the control plane endpoint like `https://cloudapi.example.com`.
    /// No token refresher is configured and any `401` counts as an expired
    /// token; see [`Dispatcher::with_token_refresher`] and
    /// [`Dispatcher::with_auth_expiry`].
    pub fn new(
        ctx: Context,
        base_url: impl Into<String>,
        store: CredentialStore,
        signer: impl SignRequest,
    ) -> Self {
        Self {
            ctx,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            signer: Arc::new(signer),
            refresher: None,
            auth_expiry: Arc::new(UnauthorizedStatus),
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Set the refresher used when the bearer token expired.
    pub fn with_token_refresher(mut self, refresher: impl RefreshToken) -> Self {
        self.refresher = Some(Arc::new(refresher));
        self
    }

    /// Set the predicate deciding whether a response means "token expired".
    pub fn with_auth_expiry(mut self, detector: impl DetectAuthExpiry) -> Self {
        self.auth_expiry = Arc::new(detector);
        self
    }

    /// Bound every HTTP exchange by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send `value` as header `name` with every request.
    ///
    /// Headers set on the request itself take precedence.
    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// The context used by this dispatcher.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The base url, without trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential store shared by all calls.
    pub fn credential_store(&self) -> &CredentialStore {
        &self.store
    }

    /// Execute `req` and return the response as received.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::ConfigInvalid`](crate::ErrorKind::ConfigInvalid): the
    ///   store holds no usable credential. Nothing is sent.
    /// - [`ErrorKind::Transport`](crate::ErrorKind::Transport): the transport
    ///   could not reach the control plane.
    /// - [`ErrorKind::AuthExpired`](crate::ErrorKind::AuthExpired): the token
    ///   was still rejected after one refresh, or the refresh itself failed.
    ///
    /// Any other response, including `4xx` and `5xx`, is returned as `Ok`.
    pub async fn send(&self, req: &ApiRequest) -> Result<Response> {
        let url = self.url(req);
        let body = match req.body() {
            Some(v) => Bytes::from(serde_json::to_vec(v)?),
            None => Bytes::new(),
        };

        let mut attempt = Attempt::First;
        loop {
            let credential = self.store.snapshot();
            if !credential.is_valid() {
                return Err(Error::config_invalid(
                    "neither bearer token nor access/secret key pair is configured",
                ));
            }

            let mut parts = self.build(req, &url)?;
            self.signer
                .sign_request(&self.ctx, &mut parts, &credential)
                .await?;

            debug!("sending {} {url} ({attempt:?})", req.method());
            let resp: Response = self
                .ctx
                .http_send(http::Request::from_parts(parts, body.clone()))
                .await?
                .into();
            debug!("received {} for {} {url}", resp.status(), req.method());

            if credential.bearer_token().is_none() || !self.auth_expiry.is_auth_expired(&resp) {
                return Ok(resp);
            }
            let Some(refresher) = &self.refresher else {
                return Ok(resp);
            };

            match attempt {
                Attempt::First => {
                    warn!(
                        "bearer token rejected with {} for {} {url}, refreshing",
                        resp.status(),
                        req.method()
                    );
                    self.store
                        .refresh(&self.ctx, refresher.as_ref())
                        .await
                        .map_err(|e| {
                            Error::auth_expired("failed to refresh bearer token").with_source(e)
                        })?;
                    attempt = Attempt::Retry;
                }
                Attempt::Retry => {
                    return Err(Error::auth_expired(format!(
                        "bearer token still rejected with {} after refresh for {} {url}",
                        resp.status(),
                        req.method()
                    )));
                }
            }
        }
    }

    fn url(&self, req: &ApiRequest) -> String {
        let paq = req.path_and_query();
        if paq.starts_with('/') {
            format!("{}{paq}", self.base_url)
        } else {
            format!("{}/{paq}", self.base_url)
        }
    }

    fn build(&self, req: &ApiRequest, url: &str) -> Result<http::request::Parts> {
        let (mut parts, _) = http::Request::builder()
            .method(req.method().clone())
            .uri(url)
            .body(())?
            .into_parts();

        parts
            .headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        if req.body().is_some() {
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (k, v) in self.default_headers.iter() {
            parts.headers.insert(k, v.clone());
        }
        for (k, v) in req.headers().iter() {
            parts.headers.insert(k, v.clone());
        }

        if let Some(timeout) = self.timeout {
            parts.extensions.insert(RequestTimeout(timeout));
        }

        Ok(parts)
    }
}
