//! Alibaba Cloud RPC request signing (signature version 1.0, HMAC-SHA1).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ring::hmac;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const SIGNATURE_VERSION: &str = "1.0";

/// Percent-encode per RFC 3986: only `A-Z a-z 0-9 - _ . ~` pass through.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Sorted, encoded `key=value` pairs joined by `&`.
pub fn canonical_query(params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn string_to_sign(method: &str, params: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        method,
        percent_encode("/"),
        percent_encode(&canonical_query(params))
    )
}

/// Base64 HMAC-SHA1 of `data` under `key`.
pub fn hmac_sha1_base64(key: &[u8], data: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key);
    let tag = hmac::sign(&key, data.as_bytes());
    STANDARD.encode(tag.as_ref())
}

/// Signature for an RPC request; the signing key is the secret followed by `&`.
pub fn sign(access_key_secret: &str, method: &str, params: &[(String, String)]) -> String {
    let key = format!("{}&", access_key_secret);
    hmac_sha1_base64(key.as_bytes(), &string_to_sign(method, params))
}
