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

//! EdgeGrid (`EG1-HMAC-SHA256`) signing implementation for edgesign.
//!
//! This crate signs HTTP requests for Akamai EdgeGrid APIs. Each signature is
//! an `Authorization` header derived from the request line, a configured set
//! of headers, a hash of the (possibly truncated) body, a timestamp and a
//! single-use nonce.
//!
//! ## Quick Start
//!
//! ```no_run
//! use edgesign_core::{Context, OsEnv, Result, Signer};
//! use edgesign_edgegrid::{DefaultCredentialProvider, RequestSigner};
//! use edgesign_file_read_tokio::TokioFileRead;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_env(OsEnv);
//!
//!     // Env vars first, then `~/.edgerc`.
//!     let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//!     let mut req = http::Request::get("https://akab-xxx.luna.akamaiapis.net/papi/v1/groups")
//!         .body(())
//!         .unwrap()
//!         .into_parts()
//!         .0;
//!
//!     signer.sign(&mut req, None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export AKAMAI_HOST=akab-xxx.luna.akamaiapis.net
//! export AKAMAI_CLIENT_TOKEN=akab-client-token-xxx
//! export AKAMAI_CLIENT_SECRET=xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx=
//! export AKAMAI_ACCESS_TOKEN=akab-access-token-xxx
//! ```
//!
//! ### Edgerc File
//!
//! ```ini
//! [default]
//! host = akab-xxx.luna.akamaiapis.net
//! client_token = akab-client-token-xxx
//! client_secret = xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx=
//! access_token = akab-access-token-xxx
//! ```
//!
//! ## Signing Without a Provider
//!
//! [`sign`] is a pure function over a [`SigningRequest`](edgesign_core::SigningRequest),
//! a [`Credential`], a timestamp and a nonce. It is useful when the caller
//! already owns all of them.

#![warn(missing_docs)]

mod constants;
pub use constants::{DEFAULT_MAX_BODY_SIZE, EDGEGRID_ALGORITHM};

mod credential;
pub use credential::Credential;

mod stamp;
pub use stamp::{FixedStamp, StampSource, SystemStamp};

mod sign_request;
pub use sign_request::{auth_preamble, canonicalize, sign, RequestSigner};

mod provide_credential;
pub use provide_credential::*;
