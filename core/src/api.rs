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

use std::fmt::Debug;

use http::StatusCode;

use crate::{Context, Credential, Response, Result};

/// SignRequest attaches the authentication headers to an outgoing request.
///
/// Implementations must not perform network I/O and must fail with
/// [`ErrorKind::ConfigInvalid`](crate::ErrorKind::ConfigInvalid) when the
/// credential can not authenticate the request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Sign the request in place.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        credential: &Credential,
    ) -> Result<()>;
}

/// RefreshToken obtains a new bearer token once the current one expired.
///
/// The returned token replaces the bearer token held by the
/// [`CredentialStore`](crate::CredentialStore).
#[async_trait::async_trait]
pub trait RefreshToken: Debug + Send + Sync + 'static {
    /// Return a fresh bearer token.
    async fn refresh_token(&self, ctx: &Context, credential: &Credential) -> Result<String>;
}

/// DetectAuthExpiry decides whether a response means "bearer token expired".
///
/// Closures of type `Fn(&Response) -> bool` implement this trait too.
pub trait DetectAuthExpiry: Send + Sync + 'static {
    /// Returns true if the request should be retried with a refreshed token.
    fn is_auth_expired(&self, resp: &Response) -> bool;
}

impl<F> DetectAuthExpiry for F
where
    F: Fn(&Response) -> bool + Send + Sync + 'static,
{
    fn is_auth_expired(&self, resp: &Response) -> bool {
        self(resp)
    }
}

/// UnauthorizedStatus treats every `401 Unauthorized` as an expired token.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnauthorizedStatus;

impl DetectAuthExpiry for UnauthorizedStatus {
    fn is_auth_expired(&self, resp: &Response) -> bool {
        resp.status() == StatusCode::UNAUTHORIZED
    }
}
