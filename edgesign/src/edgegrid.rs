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

//! EdgeGrid support with convenience APIs

pub use edgesign_edgegrid::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Signer};

/// Default EdgeGrid Signer type.
#[cfg(feature = "default-context")]
pub type DefaultSigner = Signer<Credential>;

/// Create a default EdgeGrid signer.
///
/// This function creates a signer with:
/// - Default context (Tokio file reader, OS environment)
/// - Default credential provider (`AKAMAI_*` env vars, then `~/.edgerc`)
/// - Request signer with the system clock and random nonces
///
/// # Customization
///
/// ```no_run
/// use edgesign::edgegrid::{default_signer, EdgercCredentialProvider};
///
/// let signer = default_signer().with_credential_provider(
///     EdgercCredentialProvider::new()
///         .with_path("/etc/akamai/edgerc")
///         .with_section("ccu"),
/// );
/// ```
#[cfg(feature = "default-context")]
pub fn default_signer() -> DefaultSigner {
    Signer::new(
        default_context(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    )
}
