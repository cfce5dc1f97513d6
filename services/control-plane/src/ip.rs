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

//! Helpers to allow the caller's own address on a cluster.

use std::net::IpAddr;

use bytes::Bytes;
use capella_rest_core::{Context, Error, Result};
use http::StatusCode;
use log::debug;

use crate::constants::PUBLIC_IP_URL;

/// Fetch the public address this process is seen from.
///
/// Failure is not fatal by itself: callers decide whether to fall back to a
/// wider CIDR or give up.
pub async fn public_ip(ctx: &Context) -> Result<IpAddr> {
    public_ip_from(ctx, PUBLIC_IP_URL).await
}

/// Same as [`public_ip`] with a custom lookup service answering in plain text.
pub async fn public_ip_from(ctx: &Context, url: &str) -> Result<IpAddr> {
    let req = http::Request::get(url).body(Bytes::new())?;
    let resp = ctx.http_send_as_string(req).await?;
    if resp.status() != StatusCode::OK {
        return Err(Error::unexpected(format!(
            "fetch public ip from {url} failed with status {}",
            resp.status()
        )));
    }

    let ip = resp.body().trim().parse::<IpAddr>().map_err(|e| {
        Error::unexpected(format!("{url} answered with invalid ip {:?}", resp.body()))
            .with_source(e)
    })?;
    debug!("public ip is {ip}");
    Ok(ip)
}

/// Render the single-host CIDR of `ip`: `/32` for IPv4, `/128` for IPv6.
pub fn allowed_cidr(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v) => format!("{v}/32"),
        IpAddr::V6(v) => format!("{v}/128"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capella_rest_core::ErrorKind;
    use capella_rest_http_send_reqwest::ReqwestHttpSend;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn lookup(status: u16, body: &str) -> Result<IpAddr> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;

        let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
        public_ip_from(&ctx, &server.uri()).await
    }

    #[tokio::test]
    async fn test_public_ip() -> anyhow::Result<()> {
        let ip = lookup(200, "203.0.113.7\n").await?;
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>()?);
        assert_eq!(allowed_cidr(ip), "203.0.113.7/32");
        Ok(())
    }

    #[tokio::test]
    async fn test_public_ip_failures() {
        let err = lookup(503, "").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);

        let err = lookup(200, "<html>blocked</html>").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_allowed_cidr_v6() {
        let ip: IpAddr = "2001:db8::1".parse().unwrap();
        assert_eq!(allowed_cidr(ip), "2001:db8::1/128");
    }
}
