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
use ini::Ini;
use log::debug;

use edgesign_core::{Context, Error, ProvideCredential, Result};

use crate::constants::*;
use crate::Credential;

/// EdgercCredentialProvider loads credentials from an edgerc file (`~/.edgerc`).
///
/// An edgerc file is an INI file with one section per credential:
///
/// ```ini
/// [default]
/// host = akab-xxx.luna.akamaiapis.net
/// client_token = akab-client-token-xxx
/// client_secret = xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx=
/// access_token = akab-access-token-xxx
/// max_body = 131072
/// headers_to_sign = X-Test1, X-Test2
/// account_key = 1-ABCDE
/// ```
///
/// The file path is taken from [`EdgercCredentialProvider::with_path`], then
/// `AKAMAI_EDGERC`, then `~/.edgerc`. The section is taken from
/// [`EdgercCredentialProvider::with_section`], then `AKAMAI_EDGERC_SECTION`,
/// then `default`.
#[derive(Debug, Default, Clone)]
pub struct EdgercCredentialProvider {
    path: Option<String>,
    section: Option<String>,
}

impl EdgercCredentialProvider {
    /// Create a new EdgercCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edgerc file path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the section to load.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for EdgercCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = self
            .path
            .clone()
            .or_else(|| ctx.env_var(AKAMAI_EDGERC))
            .unwrap_or_else(|| DEFAULT_EDGERC_PATH.to_string());
        let path = ctx
            .expand_home_dir(&path)
            .ok_or_else(|| Error::unexpected("failed to expand home directory"))?;

        let content = match ctx.file_read_as_string(&path).await {
            Ok(content) => content,
            Err(_) => {
                debug!("edgerc file not found at {path:?}");
                return Ok(None);
            }
        };

        let section = self
            .section
            .clone()
            .or_else(|| ctx.env_var(AKAMAI_EDGERC_SECTION))
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());

        parse_edgerc(&content, &section)
            .map_err(|e| e.with_context(format!("edgerc file {path}")))
    }
}

/// Load `section` out of edgerc content.
///
/// Returns `None` if the section is absent.
fn parse_edgerc(content: &str, section: &str) -> Result<Option<Credential>> {
    let ini = Ini::load_from_str(content)
        .map_err(|e| Error::config_invalid("failed to parse edgerc").with_source(e))?;

    let Some(props) = ini.section(Some(section)) else {
        debug!("section {section} not found in edgerc");
        return Ok(None);
    };

    let required = |key: &str| {
        props.get(key).map(str::to_string).ok_or_else(|| {
            Error::config_invalid(format!(
                "required option {key:?} is missing from section {section}"
            ))
        })
    };

    let mut cred = Credential::new(
        required(EDGERC_HOST)?,
        required(EDGERC_CLIENT_TOKEN)?,
        required(EDGERC_CLIENT_SECRET)?,
        required(EDGERC_ACCESS_TOKEN)?,
    );

    if let Some(v) = props.get(EDGERC_MAX_BODY).map(str::trim) {
        let max_body: usize = v.parse().map_err(|e| {
            Error::config_invalid(format!("invalid max_body {v:?} in section {section}"))
                .with_source(e)
        })?;
        if max_body > 0 {
            cred = cred.with_max_body_size(max_body);
        }
    }

    if let Some(v) = props.get(EDGERC_HEADERS_TO_SIGN) {
        cred = cred.with_headers_to_sign(
            v.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        );
    }

    if let Some(v) = props.get(EDGERC_ACCOUNT_KEY).filter(|v| !v.is_empty()) {
        cred = cred.with_account_key(v);
    }

    debug!("loaded credential from edgerc section {section}");
    Ok(Some(cred))
}
