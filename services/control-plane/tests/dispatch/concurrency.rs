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

use capella_rest_core::{ApiRequest, Credential};
use http::StatusCode;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{dispatcher, FixedTokenRefresher};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_share_refreshed_token() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer expired-token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"errorType":"TokenExpired"}"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let refresher = FixedTokenRefresher::new("fresh-token");
    let d = dispatcher(&server.uri(), Credential::with_bearer_token("expired-token"))
        .with_token_refresher(refresher.clone());

    let mut handles = Vec::new();
    for i in 0..8 {
        let d = d.clone();
        handles.push(tokio::spawn(async move {
            d.send(&ApiRequest::get(format!("/v4/organizations/org{i}")))
                .await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await??.status(), StatusCode::OK);
    }

    // Refreshes are not de-duplicated, but never exceed one per call.
    let calls = refresher.calls();
    assert!((1..=8).contains(&calls), "unexpected refresh count {calls}");
    assert_eq!(
        d.credential_store().snapshot().bearer_token(),
        Some("fresh-token")
    );

    // Once refreshed, calls go straight through.
    d.send(&ApiRequest::get("/v4/organizations")).await?;
    assert_eq!(refresher.calls(), calls);
    Ok(())
}
