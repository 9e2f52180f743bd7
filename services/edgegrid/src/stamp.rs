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

use std::fmt::Debug;

use edgesign_core::time::{format_edgegrid_timestamp, now};

/// StampSource supplies the timestamp and nonce of a signature.
///
/// [`crate::RequestSigner`] asks for exactly one timestamp and one nonce per
/// signed request and never keeps them around.
pub trait StampSource: Debug + Send + Sync + 'static {
    /// Current UTC time as `yyyyMMddTHH:mm:ss+0000`.
    fn now(&self) -> String;

    /// A fresh single-use token.
    fn nonce(&self) -> String;
}

/// SystemStamp reads the system clock and draws nonces from a CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStamp;

impl StampSource for SystemStamp {
    fn now(&self) -> String {
        format_edgegrid_timestamp(now())
    }

    /// 128 random bits, hex encoded.
    fn nonce(&self) -> String {
        hex::encode(rand::random::<[u8; 16]>())
    }
}

/// FixedStamp always returns the same timestamp and nonce.
///
/// # Note
///
/// A fixed nonce makes every signature replayable. Only use this to
/// reproduce known signatures in tests.
#[derive(Debug, Clone)]
pub struct FixedStamp {
    timestamp: String,
    nonce: String,
}

impl FixedStamp {
    /// Create a new FixedStamp.
    pub fn new(timestamp: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            nonce: nonce.into(),
        }
    }
}

impl StampSource for FixedStamp {
    fn now(&self) -> String {
        self.timestamp.clone()
    }

    fn nonce(&self) -> String {
        self.nonce.clone()
    }
}
