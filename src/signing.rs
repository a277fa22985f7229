//! AWS Signature Version 4 for the SES form API.
//!
//! Signs a single POST with a known body: canonical request over
//! `host`, `x-amz-content-sha256` and `x-amz-date` (plus the security
//! token for session credentials), a signing key derived from the
//! secret via the date/region/service HMAC chain, and the resulting
//! `Authorization` header value.

use crate::models::Credentials;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Headers to attach to the outgoing request.
///
/// The transport must send a `Host` header matching the one signed here;
/// reqwest derives it from the URL the same way [`sign_request`] does.
#[derive(Debug)]
pub(crate) struct SignedHeaders {
    pub(crate) authorization: String,
    pub(crate) amz_date: String,
    pub(crate) content_sha256: String,
    pub(crate) security_token: Option<String>,
}

/// Sign a request against the SES endpoint.
pub(crate) fn sign_request(
    method: &str,
    url: &Url,
    payload: &[u8],
    credentials: &Credentials,
    region: &str,
    service: &str,
    now: DateTime<Utc>,
) -> SignedHeaders {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();
    let payload_hash = sha256_hex(payload);

    let host = match (url.host_str().unwrap_or_default(), url.port()) {
        (host, Some(port)) => format!("{host}:{port}"),
        (host, None) => host.to_string(),
    };

    // Header names in lowercase, sorted; values already in canonical form.
    let mut headers: Vec<(&str, &str)> = vec![
        ("host", &host),
        ("x-amz-content-sha256", &payload_hash),
        ("x-amz-date", &amz_date),
    ];
    if let Some(token) = &credentials.session_token {
        headers.push(("x-amz-security-token", token));
    }
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";");

    // The form API is always rooted at "/" with no query string.
    let canonical_request = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        method,
        url.path(),
        canonical_headers,
        signed_headers,
        payload_hash
    );

    let credential_scope = format!("{date_stamp}/{region}/{service}/aws4_request");
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{credential_scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let signing_key = derive_signing_key(&credentials.secret_access_key, &date_stamp, region, service);
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    let authorization = format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
        credentials.access_key_id
    );

    SignedHeaders {
        authorization,
        amz_date,
        content_sha256: payload_hash,
        security_token: credentials.session_token.clone(),
    }
}

/// kSigning = HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), service), "aws4_request")
fn derive_signing_key(secret_key: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_secret = format!("AWS4{secret_key}");
    let k_date = hmac_sha256(k_secret.as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // Signing key example from the AWS SigV4 documentation.
    #[test]
    fn derives_documented_signing_key() {
        let key = derive_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        );
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn hashes_empty_payload_to_known_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn authorization_names_the_signed_headers() {
        let url = Url::parse("https://email.eu-west-1.amazonaws.com/").unwrap();
        let creds = Credentials::new("AKIDEXAMPLE", "secret");
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let signed = sign_request("POST", &url, b"Action=SendEmail", &creds, "eu-west-1", "email", now);

        assert!(signed.authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
        assert!(signed.authorization.contains("20240301/eu-west-1/email/aws4_request"));
        assert!(
            signed
                .authorization
                .contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date,")
        );
        assert_eq!(signed.amz_date, "20240301T120000Z");
        assert!(signed.security_token.is_none());
    }

    #[test]
    fn session_token_joins_the_signed_headers() {
        let url = Url::parse("https://email.us-east-1.amazonaws.com/").unwrap();
        let creds = Credentials::new("AKIDEXAMPLE", "secret").with_session_token("FwoGZXIvYXdzEJr");
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let signed = sign_request("POST", &url, b"", &creds, "us-east-1", "email", now);

        assert!(signed.authorization.contains(
            "SignedHeaders=host;x-amz-content-sha256;x-amz-date;x-amz-security-token,"
        ));
        assert_eq!(signed.security_token.as_deref(), Some("FwoGZXIvYXdzEJr"));
    }

    #[test]
    fn host_with_port_is_signed_verbatim() {
        let url = Url::parse("http://127.0.0.1:5000/").unwrap();
        let creds = Credentials::new("AKIDEXAMPLE", "secret");
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        // Signing must not panic on non-default ports; the host line carries the port.
        let signed = sign_request("POST", &url, b"x=y", &creds, "us-east-1", "email", now);
        assert!(!signed.content_sha256.is_empty());
    }
}
