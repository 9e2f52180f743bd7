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
use log::debug;

use edgesign_core::{Context, ProvideCredential, Result};

use crate::constants::*;
use crate::Credential;

/// EnvCredentialProvider loads EdgeGrid credentials from environment variables.
///
/// For the `default` section this provider reads:
///
/// - `AKAMAI_HOST`
/// - `AKAMAI_CLIENT_TOKEN`
/// - `AKAMAI_CLIENT_SECRET`
/// - `AKAMAI_ACCESS_TOKEN`
/// - `AKAMAI_MAX_BODY` (optional)
/// - `AKAMAI_ACCOUNT_KEY` (optional)
///
/// Any other section is read with its upper-cased name inserted after the
/// prefix: section `ccu` reads `AKAMAI_CCU_HOST` and so on.
///
/// The section is taken from [`EnvCredentialProvider::with_section`], then
/// from `AKAMAI_EDGERC_SECTION`, then falls back to `default`.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider {
    section: Option<String>,
}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the section to load.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    fn prefix(&self, ctx: &Context) -> String {
        let section = self
            .section
            .clone()
            .or_else(|| ctx.env_var(AKAMAI_EDGERC_SECTION))
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());

        if section.eq_ignore_ascii_case(DEFAULT_SECTION) {
            AKAMAI_ENV_PREFIX.to_string()
        } else {
            format!("{AKAMAI_ENV_PREFIX}_{}", section.to_ascii_uppercase())
        }
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let prefix = self.prefix(ctx);
        let var = |suffix: &str| ctx.env_var(&format!("{prefix}_{suffix}"));

        let (Some(host), Some(client_token), Some(client_secret), Some(access_token)) = (
            var(ENV_HOST),
            var(ENV_CLIENT_TOKEN),
            var(ENV_CLIENT_SECRET),
            var(ENV_ACCESS_TOKEN),
        ) else {
            debug!("{prefix}_* credential env not complete, skipping");
            return Ok(None);
        };

        // Unparsable or non-positive values fall back to the default.
        let max_body_size = var(ENV_MAX_BODY)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(DEFAULT_MAX_BODY_SIZE);

        let mut cred = Credential::new(host, client_token, client_secret, access_token)
            .with_max_body_size(max_body_size);
        if let Some(account_key) = var(ENV_ACCOUNT_KEY).filter(|v| !v.is_empty()) {
            cred = cred.with_account_key(account_key);
        }

        debug!("loaded credential from {prefix}_* env");
        Ok(Some(cred))
    }
}
