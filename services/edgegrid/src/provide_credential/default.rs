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

use edgesign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use crate::provide_credential::{EdgercCredentialProvider, EnvCredentialProvider};
use crate::Credential;

/// DefaultCredentialProvider loads EdgeGrid credentials from the usual places.
///
/// Resolution order:
///
/// 1. Environment variables (`AKAMAI_HOST` and friends)
/// 2. The edgerc file (`~/.edgerc`)
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(EdgercCredentialProvider::new());

        Self { chain }
    }

    /// Create a DefaultCredentialProvider that loads the given section from
    /// both env and edgerc.
    pub fn with_section(section: &str) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new().with_section(section))
            .push(EdgercCredentialProvider::new().with_section(section));

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a provider that is tried before all others.
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
