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

//! Reqwest-based HTTP transport for capella-rest.
//!
//! ```no_run
//! use capella_rest_core::Context;
//! use capella_rest_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use capella_rest_core::{Error, HttpSend, RequestTimeout, Result};
use log::debug;
use reqwest::{Client, Request};

/// HttpSend implementation backed by a [`reqwest::Client`].
///
/// A [`RequestTimeout`] extension on the request overrides the client's own
/// timeout for that request.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let timeout = req.extensions().get::<RequestTimeout>().copied();
        let mut req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to build reqwest request").with_source(e))?;
        if let Some(RequestTimeout(timeout)) = timeout {
            *req.timeout_mut() = Some(timeout);
        }

        let method = req.method().clone();
        let url = req.url().clone();
        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| transport_error(&method, &url, e))?;

        let status = resp.status();
        let version = resp.version();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| transport_error(&method, &url, e))?;
        debug!("{method} {url} answered {status} with {} bytes", body.len());

        let mut http_resp = http::Response::builder()
            .status(status)
            .version(version)
            .body(body)?;
        *http_resp.headers_mut() = headers;
        Ok(http_resp)
    }
}

fn transport_error(method: &http::Method, url: &reqwest::Url, err: reqwest::Error) -> Error {
    let reason = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "failed to connect"
    } else if err.is_body() || err.is_decode() {
        "failed to read response body"
    } else {
        "failed to send request"
    };

    Error::transport(format!("{method} {url} {reason}")).with_source(err)
}
