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

use std::fmt::{Debug, Formatter};

use edgesign_core::utils::Redact;
use edgesign_core::{Error, Result, SigningCredential};

use crate::constants::DEFAULT_MAX_BODY_SIZE;

/// Credential for EdgeGrid APIs.
///
/// One credential maps to one edgerc section. Several credentials can live
/// side by side; every signing call takes the one it should use.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// API host, for example `akab-xxx.luna.akamaiapis.net`.
    pub host: String,
    /// Client token.
    pub client_token: String,
    /// Client secret, the key material of every signature.
    pub client_secret: String,
    /// Access token.
    pub access_token: String,
    /// Largest body prefix hashed into the signature.
    ///
    /// `0` hashes nothing: the content hash stays empty.
    pub max_body_size: usize,
    /// Request headers included in the signature, in this order.
    pub headers_to_sign: Vec<String>,
    /// Account switch key, sent as the `accountSwitchKey` query parameter.
    pub account_key: Option<String>,
}

impl Credential {
    /// Create a new credential with the default max body size and no
    /// headers to sign.
    pub fn new(
        host: impl Into<String>,
        client_token: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            client_token: client_token.into(),
            client_secret: client_secret.into(),
            access_token: access_token.into(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            headers_to_sign: Vec::new(),
            account_key: None,
        }
    }

    /// Set the max body size.
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Set the headers to sign.
    pub fn with_headers_to_sign<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers_to_sign = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the account switch key.
    pub fn with_account_key(mut self, account_key: impl Into<String>) -> Self {
        self.account_key = Some(account_key.into());
        self
    }

    /// Check that every field needed for signing is present.
    pub fn check(&self) -> Result<()> {
        for (name, value) in [
            ("client_token", &self.client_token),
            ("client_secret", &self.client_secret),
            ("access_token", &self.access_token),
        ] {
            if value.is_empty() {
                return Err(Error::credential_invalid(format!("{name} is empty")));
            }
        }
        Ok(())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("host", &self.host)
            .field("client_token", &Redact::from(&self.client_token))
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("access_token", &Redact::from(&self.access_token))
            .field("max_body_size", &self.max_body_size)
            .field("headers_to_sign", &self.headers_to_sign)
            .field("account_key", &Redact::from(&self.account_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}
