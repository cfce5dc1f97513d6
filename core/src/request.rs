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

use http::header::{HeaderName, IF_MATCH};
use http::{HeaderMap, HeaderValue, Method};
use log::warn;
use serde_json::{Map, Value};

use crate::Result;

/// ApiRequest describes one call against the control plane.
///
/// It is assembled with the consuming `with_*` methods and then handed to
/// [`Dispatcher::send`](crate::Dispatcher::send) by reference, so it can not
/// change once built.
///
/// ```
/// use capella_rest_core::ApiRequest;
/// use serde_json::json;
///
/// let req = ApiRequest::post("/v4/organizations/org1/projects")
///     .with_body(json!({"name": "p1"}));
/// assert_eq!(req.body(), Some(&json!({"name": "p1"})));
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: HeaderMap,
}

impl ApiRequest {
    /// Create a request for `method` on `path`.
    ///
    /// `path` is relative to the dispatcher's base url, for example
    /// `/v4/organizations/{org}/projects`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Create a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a `PATCH` request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Create a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query pair.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Pass extra fields through to the control plane.
    ///
    /// - `POST`, `PUT` and `PATCH`: merged into the JSON object body, which is
    ///   created if absent. Extra fields override fields of the same name.
    /// - other methods: appended as query pairs. Strings are used verbatim,
    ///   other values in their JSON text form.
    pub fn with_extra_fields(mut self, fields: Map<String, Value>) -> Self {
        if fields.is_empty() {
            return self;
        }

        if !self.carries_body() {
            for (k, v) in fields {
                let v = match v {
                    Value::String(s) => s,
                    v => v.to_string(),
                };
                self.query.push((k, v));
            }
            return self;
        }

        match self.body.get_or_insert_with(|| Value::Object(Map::new())) {
            Value::Object(body) => body.extend(fields),
            _ => warn!(
                "extra fields {:?} ignored: request body of {} {} is not a JSON object",
                fields.keys().collect::<Vec<_>>(),
                self.method,
                self.path
            ),
        }
        self
    }

    /// Add a header, replacing any previous value of the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add a header from strings.
    pub fn try_with_header(self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        Ok(self.with_header(name, value))
    }

    /// Only apply the update if the resource is still at `version`.
    ///
    /// The version usually comes from
    /// [`Response::resource_version`](crate::Response::resource_version).
    pub fn with_if_match(self, version: impl std::fmt::Display) -> Result<Self> {
        let value = HeaderValue::from_str(&format!("Version: {version}"))?;
        Ok(self.with_header(IF_MATCH, value))
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base url.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query pairs, unencoded.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// JSON body.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Extra headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Path followed by the form encoded query, if any.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let mut s = self.path.clone();
        s.push('?');
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        s.push_str(&query);
        s
    }

    fn carries_body(&self) -> bool {
        matches!(self.method, Method::POST | Method::PUT | Method::PATCH)
    }
}
