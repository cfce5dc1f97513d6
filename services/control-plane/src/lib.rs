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

//! Control plane support for capella-rest.
//!
//! This crate knows how the Capella control plane authenticates calls and
//! how it reports an expired session:
//!
//! - [`RequestSigner`]: bearer token or access/secret key signature.
//! - [`TokenExpired`]: recognizes the "token expired" reply.
//! - [`SessionTokenRefresher`] and [`EnvTokenRefresher`]: obtain a new token.
//! - [`Config`]: settings loaded from code or `CAPELLA_*` env values.
//! - [`public_ip`]: the caller's public address, to build allowed CIDRs.

pub mod constants;

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::{signature, RequestSigner};

mod auth_expiry;
pub use auth_expiry::TokenExpired;

mod refresh_token;
pub use refresh_token::{EnvTokenRefresher, SessionTokenRefresher};

mod ip;
pub use ip::{allowed_cidr, public_ip, public_ip_from};
