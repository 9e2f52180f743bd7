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

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::uri::{Authority, PathAndQuery, Scheme};
use http::{HeaderValue, Uri};
use log::debug;

use edgesign_core::hash::{base64_hmac_sha256, base64_sha256, hmac_sha256};
use edgesign_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::{ACCOUNT_SWITCH_KEY, EDGEGRID_ALGORITHM};
use crate::stamp::{StampSource, SystemStamp};
use crate::Credential;

/// RequestSigner that implements EdgeGrid V1 (`EG1-HMAC-SHA256`) signing.
///
/// Every call takes a fresh timestamp and nonce from its [`StampSource`]
/// and writes the result into the `Authorization` header.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    stamp: Arc<dyn StampSource>,
}

impl RequestSigner {
    /// Create a new signer that uses the system clock and random nonces.
    pub fn new() -> Self {
        Self {
            stamp: Arc::new(SystemStamp),
        }
    }

    /// Replace the timestamp and nonce source.
    ///
    /// # Note
    ///
    /// Production code should keep [`SystemStamp`]. Use this to reproduce
    /// known signatures in tests.
    pub fn with_stamp(mut self, stamp: impl StampSource) -> Self {
        self.stamp = Arc::new(stamp);
        self
    }
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        body: Option<&Bytes>,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Ok(());
        };
        cred.check()?;

        if req.uri.authority().is_none() {
            fill_authority(req, &cred.host)?;
        }

        let mut signing_req = SigningRequest::build(req, body)?;

        if let Some(key) = cred.account_key.as_deref().filter(|v| !v.is_empty()) {
            if !signing_req.query_contains(ACCOUNT_SWITCH_KEY) {
                signing_req.query_push(ACCOUNT_SWITCH_KEY, key);
            }
        }

        let timestamp = self.stamp.now();
        let nonce = self.stamp.nonce();

        let authorization = sign(&signing_req, cred, &timestamp, &nonce).and_then(|v| {
            let mut value = HeaderValue::from_str(&v)?;
            value.set_sensitive(true);
            Ok(value)
        });

        match authorization {
            Ok(value) => {
                signing_req.headers.insert(AUTHORIZATION, value);
                signing_req.apply(req)
            }
            Err(err) => {
                // Hand the headers back before bailing out.
                signing_req.apply(req)?;
                Err(err)
            }
        }
    }
}

/// Fill in `https://<host>` for requests built with a path only.
fn fill_authority(req: &mut Parts, host: &str) -> Result<()> {
    let host = host
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    if host.is_empty() {
        return Err(Error::request_invalid(
            "request has no authority and credential has no host",
        ));
    }

    let mut parts = std::mem::take(&mut req.uri).into_parts();
    parts.scheme = Some(Scheme::HTTPS);
    parts.authority = Some(Authority::from_str(host)?);
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    req.uri = Uri::from_parts(parts)?;
    Ok(())
}

/// Build the authorization header value up to and including the `;` that
/// precedes the signature field.
///
/// ```text
/// EG1-HMAC-SHA256 client_token=<ct>;access_token=<at>;timestamp=<ts>;nonce=<n>;
/// ```
pub fn auth_preamble(cred: &Credential, timestamp: &str, nonce: &str) -> String {
    format!(
        "{EDGEGRID_ALGORITHM} client_token={};access_token={};timestamp={timestamp};nonce={nonce};",
        cred.client_token, cred.access_token,
    )
}

/// Sign the request and return the full `Authorization` header value.
///
/// This is a pure function of its inputs: the same request, credential,
/// timestamp and nonce always yield the same value. Callers must pass a
/// fresh timestamp and nonce for every request they send.
pub fn sign(
    req: &SigningRequest,
    cred: &Credential,
    timestamp: &str,
    nonce: &str,
) -> Result<String> {
    cred.check()?;

    let preamble = auth_preamble(cred, timestamp, nonce);
    debug!("unsigned authorization header: {preamble}");

    let mut data = canonicalize(req, cred)?;
    data.push(b'\t');
    data.extend_from_slice(preamble.as_bytes());

    // Raw HMAC bytes, never encoded, logged or kept past this call.
    let signing_key = hmac_sha256(cred.client_secret.as_bytes(), timestamp.as_bytes());
    let signature = base64_hmac_sha256(&signing_key, &data);

    Ok(format!("{preamble}signature={signature}"))
}

/// Reduce the request to the data to sign:
///
/// ```text
/// METHOD \t scheme \t host \t /path?query \t name:value\tname:value \t content-hash
/// ```
pub fn canonicalize(req: &SigningRequest, cred: &Credential) -> Result<Vec<u8>> {
    if req.method.as_str().is_empty() {
        return Err(Error::request_invalid("request method is empty"));
    }
    if req.path.is_empty() {
        return Err(Error::request_invalid("request path is empty"));
    }
    if !req.path.starts_with('/') {
        return Err(Error::request_invalid(format!(
            "request path must start with '/', got {:?}",
            req.path
        )));
    }

    let method = req.method.as_str().to_ascii_uppercase();
    let host = signed_host(&req.authority);
    let path_and_query = req.path_and_query();

    let mut data = Vec::with_capacity(256);
    for part in [
        method.as_str(),
        req.scheme.as_str(),
        host.as_str(),
        path_and_query.as_str(),
    ] {
        data.extend_from_slice(part.as_bytes());
        data.push(b'\t');
    }
    data.extend_from_slice(&canonicalize_headers(req, &cred.headers_to_sign));
    data.push(b'\t');
    data.extend_from_slice(content_hash(req, &method, cred.max_body_size).as_bytes());

    debug!("data to sign: {}", String::from_utf8_lossy(&data));
    Ok(data)
}

/// `host[:port]` as sent in the `Host` header. Userinfo is never signed.
fn signed_host(authority: &Authority) -> String {
    match authority.port() {
        Some(port) => format!("{}:{}", authority.host(), port.as_str()),
        None => authority.host().to_string(),
    }
}

/// Configured headers as `name:value` joined by tabs, in configured order.
///
/// Headers missing from the request are skipped.
fn canonicalize_headers(req: &SigningRequest, headers_to_sign: &[String]) -> Vec<u8> {
    let mut out = Vec::new();
    for name in headers_to_sign {
        let Some(value) = req.header_get(name) else {
            continue;
        };

        if !out.is_empty() {
            out.push(b'\t');
        }
        out.extend_from_slice(name.to_ascii_lowercase().as_bytes());
        out.push(b':');
        out.extend_from_slice(&normalize_header_value(value.as_bytes()));
    }
    out
}

/// Trim the value and collapse every whitespace run into a single space.
///
/// Non-ASCII bytes are copied as is.
fn normalize_header_value(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    let mut in_space = false;
    for &b in value.trim_ascii() {
        if b.is_ascii_whitespace() {
            if !in_space {
                out.push(b' ');
            }
            in_space = true;
        } else {
            out.push(b);
            in_space = false;
        }
    }
    out
}

/// Base64 SHA-256 of the first `max_body_size` body bytes.
///
/// Empty unless the method carries a body and there is something to hash.
fn content_hash(req: &SigningRequest, method: &str, max_body_size: usize) -> String {
    if !matches!(method, "POST" | "PUT" | "PATCH") {
        return String::new();
    }
    let Some(body) = req.body.as_ref().filter(|b| !b.is_empty()) else {
        return String::new();
    };

    let size = body.len().min(max_body_size);
    if size < body.len() {
        debug!(
            "body length {} is larger than maximum {max_body_size}, truncated for hashing",
            body.len()
        );
    }
    if size == 0 {
        return String::new();
    }

    base64_sha256(&body[..size])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::FixedStamp;
    use edgesign_core::ErrorKind;
    use http::{Method, Request};
    use pretty_assertions::assert_eq;

    const TIMESTAMP: &str = "20140321T19:34:21+0000";
    const NONCE: &str = "nonce-1";

    fn test_credential() -> Credential {
        Credential::new("host", "ct1", "c2VjcmV0", "at1")
    }

    fn build(req: Request<&'static str>) -> SigningRequest {
        let (mut parts, body) = req.into_parts();
        let body = (!body.is_empty()).then(|| Bytes::from_static(body.as_bytes()));
        SigningRequest::build(&mut parts, body.as_ref()).expect("request must be valid")
    }

    fn get(uri: &str) -> SigningRequest {
        build(Request::get(uri).body("").unwrap())
    }

    fn post(uri: &str, body: &'static str) -> SigningRequest {
        build(Request::post(uri).body(body).unwrap())
    }

    fn data(req: &SigningRequest, cred: &Credential) -> String {
        String::from_utf8(canonicalize(req, cred).unwrap()).unwrap()
    }

    #[test]
    fn test_sign_golden_get() {
        let _ = env_logger::builder().is_test(true).try_init();

        let req = get("https://host/path");
        let cred = test_credential();

        assert_eq!(data(&req, &cred), "GET\thttps\thost\t/path\t\t");
        assert_eq!(
            sign(&req, &cred, TIMESTAMP, NONCE).unwrap(),
            "EG1-HMAC-SHA256 client_token=ct1;access_token=at1;\
             timestamp=20140321T19:34:21+0000;nonce=nonce-1;\
             signature=1uyWAwGeAHXjStGnMZ16A2MST6Iu9lf10P1QVazWUDM="
        );
    }

    #[test]
    fn test_sign_golden_post_with_headers() {
        let req = build(
            Request::post("https://host/path?a=1&b=2")
                .header("X-Test1", "  hello   world ")
                .header("X-Test2", "unsigned")
                .body("datadatadatadatadatadatadatadata")
                .unwrap(),
        );
        let cred = test_credential().with_headers_to_sign(["X-Test1", "X-Test3"]);

        assert_eq!(
            data(&req, &cred),
            "POST\thttps\thost\t/path?a=1&b=2\tx-test1:hello world\t\
             fDimoYqXOLntG3If/Z0K2aS9I19Pkv9P5OMCoL8lY0w="
        );
        assert_eq!(
            sign(&req, &cred, TIMESTAMP, NONCE).unwrap(),
            "EG1-HMAC-SHA256 client_token=ct1;access_token=at1;\
             timestamp=20140321T19:34:21+0000;nonce=nonce-1;\
             signature=KuWeuIjbjDwx1f70AIQ9hiStqQM5ezFVcGrYEvohSvA="
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let req = post("https://host/path", "{\"name\":\"zone\"}");
        let cred = test_credential();

        let first = sign(&req, &cred, TIMESTAMP, NONCE).unwrap();
        for _ in 0..10 {
            assert_eq!(first, sign(&req, &cred, TIMESTAMP, NONCE).unwrap());
        }
    }

    #[test]
    fn test_sign_is_sensitive_to_request() {
        let cred = test_credential().with_headers_to_sign(["X-Test1"]);
        let signature = |req: SigningRequest| sign(&req, &cred, TIMESTAMP, NONCE).unwrap();

        let base = signature(build(
            Request::post("https://host/path")
                .header("X-Test1", "v1")
                .body("body")
                .unwrap(),
        ));
        let cases = [
            Request::post("https://host/path")
                .header("X-Test1", "v1")
                .body("bodz")
                .unwrap(),
            Request::post("https://host/path")
                .header("X-Test1", "v2")
                .body("body")
                .unwrap(),
            Request::post("https://host/other")
                .header("X-Test1", "v1")
                .body("body")
                .unwrap(),
            Request::put("https://host/path")
                .header("X-Test1", "v1")
                .body("body")
                .unwrap(),
        ];
        for req in cases {
            assert_ne!(base, signature(build(req)));
        }
    }

    #[test]
    fn test_sign_is_sensitive_to_timestamp_and_nonce() {
        let req = get("https://host/path");
        let cred = test_credential();

        let base = sign(&req, &cred, TIMESTAMP, NONCE).unwrap();
        assert_ne!(
            base,
            sign(&req, &cred, "20140321T19:34:22+0000", NONCE).unwrap()
        );
        assert_ne!(base, sign(&req, &cred, TIMESTAMP, "nonce-2").unwrap());
    }

    #[test]
    fn test_content_hash_truncation() {
        let cred = test_credential().with_max_body_size(4);

        let long = post("https://host/path", "0123456789");
        let exact = post("https://host/path", "0123");
        assert_eq!(data(&long, &cred), data(&exact, &cred));
        assert_eq!(
            data(&long, &cred),
            "POST\thttps\thost\t/path\t\tG+LkUrRteg2WVrux92joJI66G3W67WX12Z6vqUiJmmo="
        );
        assert_eq!(
            sign(&long, &cred, TIMESTAMP, NONCE).unwrap(),
            "EG1-HMAC-SHA256 client_token=ct1;access_token=at1;\
             timestamp=20140321T19:34:21+0000;nonce=nonce-1;\
             signature=ad9TQhdIMHpiYAqK6g6R0wzLAw7BDEc+81MZSVYshmA="
        );

        // Shorter than the limit is hashed in full.
        let short = post("https://host/path", "012");
        assert_ne!(data(&short, &cred), data(&exact, &cred));
    }

    #[test]
    fn test_content_hash_zero_max_body_size() {
        let cred = test_credential().with_max_body_size(0);
        let req = post("https://host/path", "payload");
        assert_eq!(data(&req, &cred), "POST\thttps\thost\t/path\t\t");
    }

    #[test]
    fn test_content_hash_ignored_for_bodyless_methods() {
        let cred = test_credential();
        for method in [Method::GET, Method::DELETE, Method::HEAD, Method::OPTIONS] {
            let req = build(
                Request::builder()
                    .method(method.clone())
                    .uri("https://host/path")
                    .body("ignored body")
                    .unwrap(),
            );
            assert_eq!(
                data(&req, &cred),
                format!("{method}\thttps\thost\t/path\t\t"),
                "{method} must not hash the body"
            );
        }
    }

    #[test]
    fn test_content_hash_for_put_and_patch() {
        let cred = test_credential();
        let hash = base64_sha256(b"Hello World");
        for method in [Method::PUT, Method::PATCH] {
            let req = build(
                Request::builder()
                    .method(method.clone())
                    .uri("https://host/path")
                    .body("Hello World")
                    .unwrap(),
            );
            assert_eq!(
                data(&req, &cred),
                format!("{method}\thttps\thost\t/path\t\t{hash}")
            );
        }
    }

    #[test]
    fn test_empty_body_has_empty_hash() {
        let cred = test_credential();
        let mut req = post("https://host/path", "");
        assert_eq!(data(&req, &cred), "POST\thttps\thost\t/path\t\t");

        req.body = Some(Bytes::new());
        assert_eq!(data(&req, &cred), "POST\thttps\thost\t/path\t\t");
    }

    #[test]
    fn test_missing_signed_header_is_skipped() {
        let cred = test_credential().with_headers_to_sign(["X-Missing", "X-Present"]);
        let req = build(
            Request::get("https://host/path")
                .header("X-Present", "yes")
                .body("")
                .unwrap(),
        );
        assert_eq!(
            data(&req, &cred),
            "GET\thttps\thost\t/path\tx-present:yes\t"
        );
        assert!(sign(&req, &cred, TIMESTAMP, NONCE).is_ok());
    }

    #[test]
    fn test_signed_headers_keep_configured_order() {
        let cred = test_credential().with_headers_to_sign(["x-b", "X-A"]);
        let req = build(
            Request::get("https://host/path")
                .header("X-A", "a")
                .header("X-B", "b")
                .body("")
                .unwrap(),
        );
        assert_eq!(
            data(&req, &cred),
            "GET\thttps\thost\t/path\tx-b:b\tx-a:a\t"
        );
    }

    #[test]
    fn test_header_whitespace_is_normalized() {
        let cred = test_credential().with_headers_to_sign(["X-A"]);
        let padded = build(
            Request::get("https://host/path")
                .header("X-A", " v1 ")
                .body("")
                .unwrap(),
        );
        let plain = build(
            Request::get("https://host/path")
                .header("X-A", "v1")
                .body("")
                .unwrap(),
        );
        assert_eq!(data(&padded, &cred), data(&plain, &cred));

        assert_eq!(normalize_header_value(b"  a \t\t b   c "), b"a b c".to_vec());
        assert_eq!(normalize_header_value(b"   "), Vec::<u8>::new());
    }

    #[test]
    fn test_header_non_ascii_is_opaque() {
        let cred = test_credential().with_headers_to_sign(["X-Utf8"]);
        let mut req = get("https://host/path");
        req.headers.insert(
            "x-utf8",
            HeaderValue::from_bytes(b"caf\xc3\xa9  \xff").unwrap(),
        );

        let data = canonicalize(&req, &cred).unwrap();
        let expected = b"\tx-utf8:caf\xc3\xa9 \xff\t";
        assert!(data.windows(expected.len()).any(|w| w == expected));
        assert!(sign(&req, &cred, TIMESTAMP, NONCE).is_ok());
    }

    #[test]
    fn test_userinfo_is_not_signed() {
        let cred = test_credential();
        let with_userinfo = get("https://user:pw@host:443/path");
        let plain = get("https://host:443/path");

        let canonical = data(&with_userinfo, &cred);
        assert_eq!(canonical, "GET\thttps\thost:443\t/path\t\t");
        assert!(!canonical.contains("pw"));
        assert_eq!(
            sign(&with_userinfo, &cred, TIMESTAMP, NONCE).unwrap(),
            sign(&plain, &cred, TIMESTAMP, NONCE).unwrap()
        );
    }

    #[test]
    fn test_sign_concurrently() {
        let cred = test_credential().with_headers_to_sign(["X-Test1"]);
        let req = build(
            Request::post("https://host/path?a=1&b=2")
                .header("X-Test1", "  hello   world ")
                .body("datadatadatadatadatadatadatadata")
                .unwrap(),
        );
        let expected = sign(&req, &cred, TIMESTAMP, NONCE).unwrap();

        let results: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        (0..50)
                            .map(|_| sign(&req, &cred, TIMESTAMP, NONCE).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(results.len(), 400);
        assert!(results.iter().all(|v| *v == expected));
    }

    #[test]
    fn test_method_is_uppercased() {
        let cred = test_credential();
        let mut req = get("https://host/path");
        req.method = Method::from_bytes(b"post").unwrap();
        req.body = Some(Bytes::from_static(b"Hello World"));
        assert_eq!(
            data(&req, &cred),
            format!(
                "POST\thttps\thost\t/path\t\t{}",
                base64_sha256(b"Hello World")
            )
        );
    }

    #[test]
    fn test_canonicalize_rejects_missing_path() {
        let cred = test_credential();
        let mut req = get("https://host/path");

        req.path = String::new();
        let err = canonicalize(&req, &cred).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        req.path = "path".to_string();
        let err = sign(&req, &cred, TIMESTAMP, NONCE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_sign_rejects_invalid_credential() {
        let req = get("https://host/path");
        for cred in [
            Credential::new("host", "", "s3cr3t-value", "at"),
            Credential::new("host", "ct", "", "at"),
            Credential::new("host", "ct", "s3cr3t-value", ""),
        ] {
            let err = sign(&req, &cred, TIMESTAMP, NONCE).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
            assert!(!err.to_string().contains("s3cr3t-value"));
        }
    }

    #[tokio::test]
    async fn test_request_signer_sets_authorization() {
        let signer = RequestSigner::new().with_stamp(FixedStamp::new(TIMESTAMP, NONCE));
        let (mut parts, _) = Request::get("https://host/path")
            .header("X-Keep", "1")
            .body(())
            .unwrap()
            .into_parts();

        signer
            .sign_request(&Context::new(), &mut parts, None, Some(&test_credential()))
            .await
            .unwrap();

        let auth = &parts.headers[AUTHORIZATION];
        assert!(auth.is_sensitive());
        assert_eq!(
            auth,
            "EG1-HMAC-SHA256 client_token=ct1;access_token=at1;\
             timestamp=20140321T19:34:21+0000;nonce=nonce-1;\
             signature=1uyWAwGeAHXjStGnMZ16A2MST6Iu9lf10P1QVazWUDM="
        );
        assert_eq!(parts.headers["x-keep"], "1");
        assert_eq!(parts.uri.to_string(), "https://host/path");
    }

    #[tokio::test]
    async fn test_request_signer_fresh_stamp_per_call() {
        let signer = RequestSigner::new();
        let cred = test_credential();

        let mut values = Vec::new();
        for _ in 0..2 {
            let (mut parts, _) = Request::get("https://host/path")
                .body(())
                .unwrap()
                .into_parts();
            signer
                .sign_request(&Context::new(), &mut parts, None, Some(&cred))
                .await
                .unwrap();
            values.push(parts.headers[AUTHORIZATION].clone());
        }
        assert_ne!(values[0], values[1]);
    }

    #[tokio::test]
    async fn test_request_signer_without_credential() {
        let (mut parts, _) = Request::get("https://host/path")
            .body(())
            .unwrap()
            .into_parts();
        RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, None, None)
            .await
            .unwrap();
        assert!(parts.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_request_signer_fills_host_and_account_key() {
        let signer = RequestSigner::new().with_stamp(FixedStamp::new(TIMESTAMP, NONCE));
        let cred = Credential::new(
            "https://akab-host.luna.akamaiapis.net/",
            "ct1",
            "c2VjcmV0",
            "at1",
        )
        .with_account_key("1-ABCDE");
        let (mut parts, _) = Request::get("/identity-management/v3/user-profile?x=1")
            .body(())
            .unwrap()
            .into_parts();

        signer
            .sign_request(&Context::new(), &mut parts, None, Some(&cred))
            .await
            .unwrap();

        assert_eq!(
            parts.uri.to_string(),
            "https://akab-host.luna.akamaiapis.net/identity-management/v3/user-profile\
             ?x=1&accountSwitchKey=1-ABCDE"
        );

        // The signature covers the rewritten request.
        let (mut signed, _) = Request::get(parts.uri.clone())
            .body(())
            .unwrap()
            .into_parts();
        let expected = sign(
            &SigningRequest::build(&mut signed, None).unwrap(),
            &cred,
            TIMESTAMP,
            NONCE,
        )
        .unwrap();
        assert_eq!(parts.headers[AUTHORIZATION], expected.as_str());
    }

    #[tokio::test]
    async fn test_request_signer_keeps_explicit_account_key() {
        let signer = RequestSigner::new();
        let cred = test_credential().with_account_key("1-ABCDE");
        let (mut parts, _) = Request::get("https://host/path?accountSwitchKey=2-XYZ")
            .body(())
            .unwrap()
            .into_parts();

        signer
            .sign_request(&Context::new(), &mut parts, None, Some(&cred))
            .await
            .unwrap();
        assert_eq!(parts.uri.query(), Some("accountSwitchKey=2-XYZ"));
    }

    #[tokio::test]
    async fn test_request_signer_rejects_invalid_credential() {
        let (mut parts, _) = Request::get("https://host/path")
            .header("X-Keep", "1")
            .body(())
            .unwrap()
            .into_parts();
        let err = RequestSigner::new()
            .sign_request(
                &Context::new(),
                &mut parts,
                None,
                Some(&Credential::new("host", "ct", "", "at")),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert_eq!(parts.headers["x-keep"], "1");
        assert!(parts.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_request_signer_reports_unencodable_header() {
        let signer = RequestSigner::new().with_stamp(FixedStamp::new(TIMESTAMP, "bad\nnonce"));
        let (mut parts, _) = Request::get("https://host/path")
            .header("X-Keep", "1")
            .body(())
            .unwrap()
            .into_parts();

        let err = signer
            .sign_request(&Context::new(), &mut parts, None, Some(&test_credential()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingInvalid);
        assert_eq!(parts.headers["x-keep"], "1");
        assert_eq!(parts.uri.to_string(), "https://host/path");
    }
}
