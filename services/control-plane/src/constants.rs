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

// Env values used in capella-rest.
pub const CAPELLA_BASE_URL: &str = "CAPELLA_BASE_URL";
pub const CAPELLA_ACCESS_KEY: &str = "CAPELLA_ACCESS_KEY";
pub const CAPELLA_SECRET_KEY: &str = "CAPELLA_SECRET_KEY";
pub const CAPELLA_BEARER_TOKEN: &str = "CAPELLA_BEARER_TOKEN";
pub const CAPELLA_USERNAME: &str = "CAPELLA_USERNAME";
pub const CAPELLA_PASSWORD: &str = "CAPELLA_PASSWORD";
pub const CAPELLA_TIMEOUT_SECS: &str = "CAPELLA_TIMEOUT_SECS";

// `errorType` returned by the control plane when a bearer token expired.
pub const TOKEN_EXPIRED_ERROR_TYPE: &str = "TokenExpired";

// Login endpoint issuing session tokens.
pub const SESSIONS_PATH: &str = "/sessions";

// Service answering with the caller's public address as plain text.
pub const PUBLIC_IP_URL: &str = "https://ifconfig.me";
