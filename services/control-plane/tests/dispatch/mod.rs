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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use capella_rest_control_plane::{RequestSigner, TokenExpired};
use capella_rest_core::{Context, Credential, CredentialStore, Dispatcher, RefreshToken, Result};
use capella_rest_http_send_reqwest::ReqwestHttpSend;

mod concurrency;
mod scenarios;

/// Hands out the same token on every refresh and counts the calls.
#[derive(Debug, Clone)]
pub struct FixedTokenRefresher {
    token: &'static str,
    calls: Arc<AtomicUsize>,
}

impl FixedTokenRefresher {
    pub fn new(token: &'static str) -> Self {
        Self {
            token,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RefreshToken for FixedTokenRefresher {
    async fn refresh_token(&self, _: &Context, _: &Credential) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.to_string())
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn dispatcher(base_url: &str, credential: Credential) -> Dispatcher {
    init_logger();

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    Dispatcher::new(
        ctx,
        base_url,
        CredentialStore::new(credential),
        RequestSigner::new(),
    )
    .with_auth_expiry(TokenExpired)
}
