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
use std::sync::{Arc, RwLock};

use log::debug;

use crate::utils::Redact;
use crate::{Context, Error, RefreshToken, Result};

/// Credential used to authenticate against the control plane.
///
/// Either a bearer token or an access/secret key pair must be present.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Access key of the API key pair.
    pub access_key: String,
    /// Secret key of the API key pair.
    pub secret_key: String,
    /// Short-lived bearer token, takes precedence over the key pair.
    pub bearer_token: Option<String>,
    /// Username used by login based token refreshers.
    pub username: Option<String>,
    /// Password used by login based token refreshers.
    pub password: Option<String>,
}

impl Credential {
    /// Create a credential from an access/secret key pair.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    /// Create a credential that only carries a bearer token.
    pub fn with_bearer_token(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Set the username and password used for login.
    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Returns the bearer token if it's set and non-empty.
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref().filter(|v| !v.is_empty())
    }

    /// Check if both access key and secret key are set.
    pub fn has_key_pair(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }

    /// Check if this credential can authenticate a request.
    pub fn is_valid(&self) -> bool {
        self.bearer_token().is_some() || self.has_key_pair()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("bearer_token", &Redact::from(&self.bearer_token))
            .field("username", &self.username)
            .field("password", &Redact::from(&self.password))
            .finish()
    }
}

/// CredentialStore holds the credential shared by every call of a dispatcher.
///
/// The store is a cheap handle: clones observe the same credential. The only
/// way to change it after construction is [`CredentialStore::refresh`] (or
/// [`CredentialStore::set_bearer_token`] for tokens obtained out of band), so
/// a refresh done by one call is visible to every later call.
#[derive(Clone, Debug, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Credential>>,
}

impl CredentialStore {
    /// Create a new store holding the given credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            inner: Arc::new(RwLock::new(credential)),
        }
    }

    /// Take a copy of the current credential.
    pub fn snapshot(&self) -> Credential {
        self.inner.read().expect("lock poisoned").clone()
    }

    /// Replace the bearer token.
    pub fn set_bearer_token(&self, token: impl Into<String>) {
        self.inner.write().expect("lock poisoned").bearer_token = Some(token.into());
    }

    /// Obtain a new bearer token from `refresher` and store it.
    ///
    /// The lock is not held while the refresher runs. Concurrent refreshes are
    /// all performed and the last one to finish wins.
    ///
    /// An empty token is rejected with
    /// [`ErrorKind::AuthExpired`](crate::ErrorKind::AuthExpired) and the
    /// stored credential is left untouched.
    pub async fn refresh(&self, ctx: &Context, refresher: &dyn RefreshToken) -> Result<String> {
        let credential = self.snapshot();
        let token = refresher.refresh_token(ctx, &credential).await?;
        if token.trim().is_empty() {
            return Err(Error::auth_expired("token refresher returned an empty token"));
        }
        debug!("bearer token refreshed: {:?}", Redact::from(&token));

        self.set_bearer_token(token.clone());
        Ok(token)
    }
}
