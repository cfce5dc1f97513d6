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

//! Control plane request signer.

use std::fmt::Write;

use capella_rest_core::hash::base64_hmac_sha256;
use capella_rest_core::time::{format_http_date, now, DateTime};
use capella_rest_core::{Context, Credential, Error, Result, SignRequest};
use http::header::{AUTHORIZATION, DATE};
use http::{HeaderValue, Method};
use log::debug;

/// RequestSigner authenticates requests against the control plane.
///
/// - With a bearer token: `Authorization: Bearer <token>`.
/// - With an access/secret key pair: `Authorization: <access_key>:<signature>`
///   plus the `Date` the signature was computed for, see [`signature`].
///
/// The bearer token wins when both are configured.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: &Credential,
    ) -> Result<()> {
        if let Some(token) = credential.bearer_token() {
            let mut value: HeaderValue = format!("Bearer {token}").parse()?;
            value.set_sensitive(true);
            req.headers.insert(AUTHORIZATION, value);
            return Ok(());
        }

        if !credential.has_key_pair() {
            return Err(Error::config_invalid(
                "neither bearer token nor access/secret key pair is configured",
            ));
        }

        let date = format_http_date(self.time.unwrap_or_else(now));
        let signature = signature(
            &credential.secret_key,
            &req.method,
            req.uri.path(),
            &date,
        )?;

        req.headers.insert(DATE, date.parse()?);
        req.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue =
                format!("{}:{}", credential.access_key, signature).parse()?;
            value.set_sensitive(true);

            value
        });

        Ok(())
    }
}

/// Compute the signature of a request.
///
/// ## Format
///
/// ```text
/// base64(HMAC-SHA256(secret_key,
///     VERB + "\n" +
///     Path + "\n" +
///     Date))
/// ```
///
/// `Path` is the request path without query, `Date` the exact value sent in
/// the `Date` header.
pub fn signature(secret_key: &str, method: &Method, path: &str, date: &str) -> Result<String> {
    let mut s = String::new();
    writeln!(&mut s, "{}", method.as_str())?;
    writeln!(&mut s, "{path}")?;
    write!(&mut s, "{date}")?;

    debug!("string to sign: {}", &s);
    Ok(base64_hmac_sha256(secret_key.as_bytes(), s.as_bytes()))
}
