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

use capella_rest::control_plane::{default_dispatcher, Config};
use capella_rest::{default_context, ApiRequest, Result};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let org = std::env::var("CAPELLA_ORGANIZATION_ID").unwrap_or_default();
    let config = Config::new().from_env(&default_context());
    let dispatcher = default_dispatcher(&config)?;

    let resp = dispatcher
        .send(
            &ApiRequest::get(format!("/v4/organizations/{org}/projects"))
                .with_query("page", "1")
                .with_query("perPage", "10"),
        )
        .await?;
    println!("Response status: {}", resp.status());
    println!("{}", resp.text());

    Ok(())
}
