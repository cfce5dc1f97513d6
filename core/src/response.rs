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

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// Response returned by the control plane, untouched.
///
/// Non-2xx statuses are not errors: callers inspect [`Response::status`].
#[derive(Debug)]
pub struct Response {
    inner: http::Response<Bytes>,
}

impl From<http::Response<Bytes>> for Response {
    fn from(inner: http::Response<Bytes>) -> Self {
        Self { inner }
    }
}

impl Response {
    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// HTTP headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Raw body.
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Body decoded as utf-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.inner.body()).into_owned()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(self.inner.body()).map_err(|e| {
            Error::unexpected(format!(
                "failed to decode response body with status {}",
                self.status()
            ))
            .with_source(e)
        })
    }

    /// The `errorType` field of a JSON error body, if any.
    pub fn error_type(&self) -> Option<String> {
        let v: Value = serde_json::from_slice(self.inner.body()).ok()?;
        v.get("errorType")?.as_str().map(|s| s.to_string())
    }

    /// The `audit.version` field of a fetched resource.
    ///
    /// Feed it back through
    /// [`ApiRequest::with_if_match`](crate::ApiRequest::with_if_match) to
    /// update the resource only if nobody changed it in between.
    pub fn resource_version(&self) -> Option<String> {
        let v: Value = serde_json::from_slice(self.inner.body()).ok()?;
        match v.pointer("/audit/version")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Consume into the underlying `http::Response`.
    pub fn into_inner(self) -> http::Response<Bytes> {
        self.inner
    }
}
