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

use std::time::Duration;

use capella_rest_core::{ApiRequest, Credential, ErrorKind};
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{dispatcher, FixedTokenRefresher};

const TOKEN_EXPIRED: &str = r#"{"code":1001,"errorType":"TokenExpired","message":"token expired"}"#;

fn authorization(req: &wiremock::Request) -> String {
    req.headers
        .get("authorization")
        .expect("authorization header must be set")
        .to_str()
        .expect("authorization header must be ascii")
        .to_string()
}

#[tokio::test]
async fn test_key_pair_get_is_signed() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/organizations/org1/projects"))
        .and(header_exists("date"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let d = dispatcher(&server.uri(), Credential::new("AK1", "SK1"));
    let resp = d
        .send(&ApiRequest::get("/v2/organizations/org1/projects"))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let auth = authorization(&received[0]);
    assert!(auth.starts_with("AK1:"), "unexpected authorization: {auth}");
    Ok(())
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/organizations/org1/projects"))
        .and(header("authorization", "Bearer expired-token"))
        .respond_with(ResponseTemplate::new(401).set_body_string(TOKEN_EXPIRED))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4/organizations/org1/projects"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
        .expect(2)
        .mount(&server)
        .await;

    let refresher = FixedTokenRefresher::new("fresh-token");
    let d = dispatcher(&server.uri(), Credential::with_bearer_token("expired-token"))
        .with_token_refresher(refresher.clone());

    let resp = d
        .send(&ApiRequest::get("/v4/organizations/org1/projects"))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(refresher.calls(), 1);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(authorization(&received[0]), "Bearer expired-token");
    assert_eq!(authorization(&received[1]), "Bearer fresh-token");

    // Later calls reuse the refreshed token.
    d.send(&ApiRequest::get("/v4/organizations/org1/projects"))
        .await?;
    assert_eq!(refresher.calls(), 1);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
    assert_eq!(authorization(&received[2]), "Bearer fresh-token");
    Ok(())
}

#[tokio::test]
async fn test_expired_twice_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(TOKEN_EXPIRED))
        .expect(2)
        .mount(&server)
        .await;

    let refresher = FixedTokenRefresher::new("still-expired");
    let d = dispatcher(&server.uri(), Credential::with_bearer_token("expired-token"))
        .with_token_refresher(refresher.clone());

    let err = d
        .send(&ApiRequest::get("/v4/organizations/org1/projects"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthExpired);
    assert_eq!(refresher.calls(), 1);
}

#[tokio::test]
async fn test_plain_unauthorized_is_not_retried() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"errorType":"Unauthorized"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let refresher = FixedTokenRefresher::new("fresh-token");
    let d = dispatcher(&server.uri(), Credential::with_bearer_token("revoked-token"))
        .with_token_refresher(refresher.clone());

    let resp = d.send(&ApiRequest::get("/v4/organizations")).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.error_type().as_deref(), Some("Unauthorized"));
    assert_eq!(refresher.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_post_sends_json_body() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/organizations/org1/projects"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":"p1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let d = dispatcher(&server.uri(), Credential::new("AK1", "SK1"));
    let resp = d
        .send(&ApiRequest::post("/v2/organizations/org1/projects").with_body(json!({"name": "p1"})))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body)?;
    assert_eq!(body, json!({"name": "p1"}));
    Ok(())
}

#[tokio::test]
async fn test_update_with_if_match() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let cluster = "/v4/organizations/org1/projects/p1/clusters/c1";
    Mock::given(method("GET"))
        .and(path(cluster))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"id":"c1","audit":{"version":3}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(cluster))
        .and(header("if-match", "Version: 3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let d = dispatcher(&server.uri(), Credential::with_bearer_token("token"));
    let version = d
        .send(&ApiRequest::get(cluster))
        .await?
        .resource_version()
        .expect("cluster must carry a version");

    let resp = d
        .send(
            &ApiRequest::put(cluster)
                .with_body(json!({"name": "c1", "description": "renamed"}))
                .with_if_match(version)?,
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn test_server_errors_are_returned() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"errorType":"InternalServerError"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let d = dispatcher(&server.uri(), Credential::with_bearer_token("token"))
        .with_token_refresher(FixedTokenRefresher::new("unused"));
    let resp = d
        .send(&ApiRequest::delete("/v4/organizations/org1/projects/p1"))
        .await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let d = dispatcher(&server.uri(), Credential::with_bearer_token("token"))
        .with_timeout(Duration::from_millis(100));
    let err = d
        .send(&ApiRequest::get("/v4/organizations"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let d = dispatcher(&server.uri(), Credential::default());
    let err = d
        .send(&ApiRequest::get("/v4/organizations"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}
