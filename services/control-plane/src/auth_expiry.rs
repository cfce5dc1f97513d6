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

use capella_rest_core::{DetectAuthExpiry, Response};
use http::StatusCode;

use crate::constants::TOKEN_EXPIRED_ERROR_TYPE;

/// TokenExpired matches the control plane's "bearer token expired" reply.
///
/// That is a `401 Unauthorized` whose JSON body carries
/// `"errorType": "TokenExpired"`. Other `401`s (wrong key, revoked user) are
/// returned to the caller as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenExpired;

impl DetectAuthExpiry for TokenExpired {
    fn is_auth_expired(&self, resp: &Response) -> bool {
        resp.status() == StatusCode::UNAUTHORIZED
            && resp.error_type().as_deref() == Some(TOKEN_EXPIRED_ERROR_TYPE)
    }
}
