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

use async_trait::async_trait;
use bytes::Bytes;
use capella_rest_core::{
    ApiRequest, Context, Credential, CredentialStore, Dispatcher, HttpSend, Result, SignRequest,
};
use http::request::Parts;

// A signer that sends the access key as a plain header.
#[derive(Debug)]
struct ApiKeySigner;

#[async_trait]
impl SignRequest for ApiKeySigner {
    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut Parts,
        credential: &Credential,
    ) -> Result<()> {
        req.headers
            .insert("x-api-key", credential.access_key.parse()?);
        Ok(())
    }
}

// A transport that echoes the request headers instead of talking to a server.
#[derive(Debug)]
struct EchoHttpSend;

#[async_trait]
impl HttpSend for EchoHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let body = format!("{:?}", req.headers());
        Ok(http::Response::new(Bytes::from(body)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_http_send(EchoHttpSend);
    let store = CredentialStore::new(Credential::new("demo-access-key", "demo-secret-key"));
    let dispatcher = Dispatcher::new(ctx, "https://api.example.com", store, ApiKeySigner);

    let resp = dispatcher
        .send(&ApiRequest::get("/v4/organizations"))
        .await?;
    println!("status: {}", resp.status());
    println!("sent headers: {}", resp.text());

    Ok(())
}
