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

/// Signing algorithm moniker: EdgeGrid V1, HMAC, SHA-256.
pub const EDGEGRID_ALGORITHM: &str = "EG1-HMAC-SHA256";

/// Query parameter used to act on behalf of another account.
pub const ACCOUNT_SWITCH_KEY: &str = "accountSwitchKey";

/// Largest body prefix hashed into the signature unless configured otherwise.
pub const DEFAULT_MAX_BODY_SIZE: usize = 131072;

/// Default edgerc path.
pub const DEFAULT_EDGERC_PATH: &str = "~/.edgerc";
/// Default edgerc section.
pub const DEFAULT_SECTION: &str = "default";

// Env values used by the edgerc provider.
pub const AKAMAI_EDGERC: &str = "AKAMAI_EDGERC";
pub const AKAMAI_EDGERC_SECTION: &str = "AKAMAI_EDGERC_SECTION";

// Env prefix and suffixes used by the env provider: `AKAMAI[_<SECTION>]_<SUFFIX>`.
pub const AKAMAI_ENV_PREFIX: &str = "AKAMAI";
pub const ENV_HOST: &str = "HOST";
pub const ENV_CLIENT_TOKEN: &str = "CLIENT_TOKEN";
pub const ENV_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ENV_MAX_BODY: &str = "MAX_BODY";
pub const ENV_ACCOUNT_KEY: &str = "ACCOUNT_KEY";

// Keys inside an edgerc section.
pub const EDGERC_HOST: &str = "host";
pub const EDGERC_CLIENT_TOKEN: &str = "client_token";
pub const EDGERC_CLIENT_SECRET: &str = "client_secret";
pub const EDGERC_ACCESS_TOKEN: &str = "access_token";
pub const EDGERC_MAX_BODY: &str = "max_body";
pub const EDGERC_HEADERS_TO_SIGN: &str = "headers_to_sign";
pub const EDGERC_ACCOUNT_KEY: &str = "account_key";
