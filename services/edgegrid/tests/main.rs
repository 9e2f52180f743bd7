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

//! End-to-end signing through `Signer`.

use std::collections::HashMap;
use std::io::Write;

use bytes::Bytes;
use edgesign_core::{Context, ErrorKind, Result, Signer, StaticEnv};
use edgesign_edgegrid::{
    Credential, DefaultCredentialProvider, EdgercCredentialProvider, FixedStamp, RequestSigner,
    StaticCredentialProvider,
};
use edgesign_file_read_tokio::TokioFileRead;
use http::header::AUTHORIZATION;
use http::Request;
use log::debug;
use pretty_assertions::assert_eq;

const TIMESTAMP: &str = "20140321T19:34:21+0000";
const NONCE: &str = "nonce-1";

fn fixed_signer() -> RequestSigner {
    RequestSigner::new().with_stamp(FixedStamp::new(TIMESTAMP, NONCE))
}

fn empty_ctx() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_env(StaticEnv::default())
}

#[tokio::test]
async fn test_sign_get() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let signer = Signer::new(
        empty_ctx(),
        StaticCredentialProvider::new("host", "ct1", "c2VjcmV0", "at1"),
        fixed_signer(),
    );

    let (mut parts, body) = Request::get("https://host/path").body(())?.into_parts();
    signer.sign(&mut parts, None).await?;
    let req = Request::from_parts(parts, body);
    debug!("signed request: {req:?}");

    assert_eq!(
        req.headers()[AUTHORIZATION],
        "EG1-HMAC-SHA256 client_token=ct1;access_token=at1;\
         timestamp=20140321T19:34:21+0000;nonce=nonce-1;\
         signature=1uyWAwGeAHXjStGnMZ16A2MST6Iu9lf10P1QVazWUDM="
    );
    Ok(())
}

#[tokio::test]
async fn test_sign_post_with_body_and_headers() -> Result<()> {
    let cred = Credential::new("host", "ct1", "c2VjcmV0", "at1").with_headers_to_sign(["X-Test1"]);
    let signer = Signer::new(
        empty_ctx(),
        StaticCredentialProvider::from_credential(cred),
        fixed_signer(),
    );

    let body = Bytes::from_static(b"datadatadatadatadatadatadatadata");
    let (mut parts, _) = Request::post("https://host/path?a=1&b=2")
        .header("X-Test1", "  hello   world ")
        .body(())?
        .into_parts();
    signer.sign(&mut parts, Some(&body)).await?;

    assert_eq!(
        parts.headers[AUTHORIZATION],
        "EG1-HMAC-SHA256 client_token=ct1;access_token=at1;\
         timestamp=20140321T19:34:21+0000;nonce=nonce-1;\
         signature=KuWeuIjbjDwx1f70AIQ9hiStqQM5ezFVcGrYEvohSvA="
    );
    // The request itself is left untouched apart from the new header.
    assert_eq!(parts.headers["x-test1"], "  hello   world ");
    assert_eq!(parts.uri.to_string(), "https://host/path?a=1&b=2");
    Ok(())
}

#[tokio::test]
async fn test_sign_with_truncated_body() -> Result<()> {
    let cred = Credential::new("host", "ct1", "c2VjcmV0", "at1").with_max_body_size(4);
    let signer = Signer::new(
        empty_ctx(),
        StaticCredentialProvider::from_credential(cred),
        fixed_signer(),
    );

    let mut values = Vec::new();
    for body in [&b"0123456789"[..], &b"0123"[..]] {
        let body = Bytes::copy_from_slice(body);
        let (mut parts, _) = Request::post("https://host/path").body(())?.into_parts();
        signer.sign(&mut parts, Some(&body)).await?;
        values.push(parts.headers[AUTHORIZATION].clone());
    }

    assert_eq!(values[0], values[1]);
    assert_eq!(
        values[0],
        "EG1-HMAC-SHA256 client_token=ct1;access_token=at1;\
         timestamp=20140321T19:34:21+0000;nonce=nonce-1;\
         signature=ad9TQhdIMHpiYAqK6g6R0wzLAw7BDEc+81MZSVYshmA="
    );
    Ok(())
}

#[tokio::test]
async fn test_sign_from_edgerc() -> Result<()> {
    let mut f = tempfile::NamedTempFile::new()?;
    writeln!(
        f,
        "[papi]\nhost = akab-host.luna.akamaiapis.net\nclient_token = ct1\n\
         client_secret = c2VjcmV0\naccess_token = at1\naccount_key = 1-ABCDE"
    )?;

    let signer = Signer::new(
        empty_ctx(),
        EdgercCredentialProvider::new()
            .with_path(f.path().to_string_lossy())
            .with_section("papi"),
        RequestSigner::new(),
    );

    let (mut parts, _) = Request::get("/papi/v1/groups").body(())?.into_parts();
    signer.sign(&mut parts, None).await?;

    assert_eq!(
        parts.uri.to_string(),
        "https://akab-host.luna.akamaiapis.net/papi/v1/groups?accountSwitchKey=1-ABCDE"
    );
    let auth = parts.headers[AUTHORIZATION].to_str().expect("must be ascii");
    assert!(auth.starts_with("EG1-HMAC-SHA256 client_token=ct1;access_token=at1;timestamp="));
    assert!(parts.headers[AUTHORIZATION].is_sensitive());
    Ok(())
}

#[tokio::test]
async fn test_sign_without_credential() {
    let signer = Signer::new(empty_ctx(), DefaultCredentialProvider::new(), RequestSigner::new());

    let (mut parts, _) = Request::get("https://host/path")
        .body(())
        .expect("request must be valid")
        .into_parts();
    let err = signer.sign(&mut parts, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    let msg = err.to_string();
    assert!(msg.contains("EnvCredentialProvider"), "{msg}");
    assert!(msg.contains("EdgercCredentialProvider"), "{msg}");
    assert!(parts.headers.get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_sign_with_env_credential() -> Result<()> {
    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([
                ("AKAMAI_HOST".to_string(), "host".to_string()),
                ("AKAMAI_CLIENT_TOKEN".to_string(), "ct1".to_string()),
                ("AKAMAI_CLIENT_SECRET".to_string(), "c2VjcmV0".to_string()),
                ("AKAMAI_ACCESS_TOKEN".to_string(), "at1".to_string()),
            ]),
        });
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), fixed_signer());

    let (mut parts, _) = Request::get("/path").body(())?.into_parts();
    signer.sign(&mut parts, None).await?;

    assert_eq!(parts.uri.to_string(), "https://host/path");
    assert_eq!(
        parts.headers[AUTHORIZATION],
        "EG1-HMAC-SHA256 client_token=ct1;access_token=at1;\
         timestamp=20140321T19:34:21+0000;nonce=nonce-1;\
         signature=1uyWAwGeAHXjStGnMZ16A2MST6Iu9lf10P1QVazWUDM="
    );
    Ok(())
}
