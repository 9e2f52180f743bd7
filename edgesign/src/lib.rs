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

//! Sign Akamai EdgeGrid API requests without effort.
//!
//! This crate bundles [`edgesign_core`] with the EdgeGrid signer and a
//! ready-made [`Context`].
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> edgesign::Result<()> {
//! let signer = edgesign::edgegrid::default_signer();
//!
//! let mut req = http::Request::get("https://akab-xxx.luna.akamaiapis.net/papi/v1/groups")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
//! signer.sign(&mut req, None).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use edgesign_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;

#[cfg(feature = "edgegrid")]
pub mod edgegrid;
