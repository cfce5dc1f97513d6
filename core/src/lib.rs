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

//! Core components for calling the Capella control plane.
//!
//! This crate provides the foundational types and traits of the capella-rest
//! ecosystem: how a call is described, signed, sent and retried.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds the HTTP transport and environment access
//! - **CredentialStore**: The credential shared by every call, with a single refresh path
//! - **Traits**: Abstract interfaces for signing (`SignRequest`), token refresh
//!   (`RefreshToken`) and expiry detection (`DetectAuthExpiry`)
//! - **Dispatcher**: The orchestrator that builds, signs and sends an [`ApiRequest`],
//!   refreshing an expired bearer token at most once per call
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use capella_rest_core::{
//!     ApiRequest, Context, Credential, CredentialStore, Dispatcher, Result, SignRequest,
//! };
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &mut http::request::Parts,
//!         credential: &Credential,
//!     ) -> Result<()> {
//!         let token = credential.bearer_token().unwrap_or_default();
//!         req.headers
//!             .insert(http::header::AUTHORIZATION, format!("Bearer {token}").parse()?);
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let store = CredentialStore::new(Credential::with_bearer_token("my-token"));
//! let dispatcher = Dispatcher::new(Context::new(), "https://cloudapi.example.com", store, MySigner);
//!
//! let resp = dispatcher
//!     .send(&ApiRequest::get("/v4/organizations"))
//!     .await?;
//! println!("status: {}", resp.status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and base64 helpers
//! - [`time`]: Time formatting helpers
//! - [`utils`]: Redaction and path building

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, RequestTimeout, StaticEnv};

mod api;
pub use api::{DetectAuthExpiry, RefreshToken, SignRequest, UnauthorizedStatus};
mod credential;
pub use credential::{Credential, CredentialStore};
mod request;
pub use request::ApiRequest;
mod response;
pub use response::Response;
mod dispatcher;
pub use dispatcher::Dispatcher;
