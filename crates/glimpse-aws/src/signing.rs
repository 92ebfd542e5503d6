//! AWS Signature Version 4 request signing.
//!
//! Only the pieces the JSON providers need are covered: a single-chunk
//! payload, header-based authentication and no query string parameters
//! beyond what the URL already carries.

use hmac::{Hmac, Mac};
use jiff::Timestamp;
use sha2::{Digest, Sha256};
use url::Url;

use crate::{AwsCredentials, TRACING_TARGET_SIGNING};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// A request about to be signed.
#[derive(Debug, Clone, Copy)]
pub struct SigningRequest<'a> {
    /// Upper-case HTTP method.
    pub method: &'a str,
    /// Full request URL, path already percent-encoded once.
    pub url: &'a Url,
    /// Extra headers to sign, in addition to `host` and `x-amz-*`.
    pub headers: &'a [(&'a str, &'a str)],
    /// Exact request body.
    pub body: &'a [u8],
}

/// Where and as what a request is signed.
#[derive(Debug, Clone, Copy)]
pub struct SigningScope<'a> {
    pub region: &'a str,
    pub service: &'a str,
    pub timestamp: Timestamp,
}

/// Headers to attach to the request.
pub type SignedHeaders = Vec<(&'static str, String)>;

/// Signs a request and returns the headers that carry the signature.
///
/// The returned headers are `x-amz-date`, `x-amz-security-token` (only for
/// temporary credentials) and `authorization`.
pub fn sign(
    credentials: &AwsCredentials,
    scope: SigningScope<'_>,
    request: SigningRequest<'_>,
) -> SignedHeaders {
    let amz_date = scope.timestamp.strftime("%Y%m%dT%H%M%SZ").to_string();
    let date = &amz_date[..8];

    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), normalize_value(value)))
        .collect();
    headers.push(("host".to_owned(), host_header(request.url)));
    headers.push(("x-amz-date".to_owned(), amz_date.clone()));
    if let Some(token) = credentials.session_token() {
        headers.push(("x-amz-security-token".to_owned(), token.to_owned()));
    }
    headers.sort();

    let signed_headers = headers
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();

    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method,
        canonical_uri(request.url),
        canonical_query(request.url),
        canonical_headers,
        signed_headers,
        hex::encode(Sha256::digest(request.body)),
    );

    let credential_scope = format!(
        "{date}/{}/{}/aws4_request",
        scope.region, scope.service
    );
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{credential_scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(
        credentials.secret_access_key(),
        date,
        scope.region,
        scope.service,
    );
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes()));

    tracing::trace!(
        target: TRACING_TARGET_SIGNING,
        service = scope.service,
        region = scope.region,
        signed_headers = %signed_headers,
        "Signed request"
    );

    let authorization = format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
        credentials.access_key_id()
    );

    let mut out = vec![("x-amz-date", amz_date.clone())];
    if let Some(token) = credentials.session_token() {
        out.push(("x-amz-security-token", token.to_owned()));
    }
    out.push(("authorization", authorization));
    out
}

/// Derives the per-day signing key.
pub fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac(format!("AWS4{secret}").as_bytes(), date.as_bytes());
    let k_region = hmac(&k_date, region.as_bytes());
    let k_service = hmac(&k_region, service.as_bytes());
    hmac(&k_service, b"aws4_request")
}

/// Percent-encodes `input` the way SigV4 expects.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) are kept; everything else is
/// encoded as upper-case `%XX`. Slashes are kept unless `encode_slash` is set.
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            b'/' if !encode_slash => encoded.push('/'),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    }
}

/// Non-S3 services expect every path segment encoded twice; the URL path is
/// already encoded once.
fn canonical_uri(url: &Url) -> String {
    let path = url.path();
    if path.is_empty() {
        "/".to_owned()
    } else {
        uri_encode(path, false)
    }
}

fn canonical_query(url: &Url) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (uri_encode(&key, true), uri_encode(&value, true)))
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn normalize_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp() -> Timestamp {
        "2015-08-30T12:36:00Z".parse().unwrap()
    }

    fn request<'a>(url: &'a Url, body: &'a [u8]) -> SigningRequest<'a> {
        SigningRequest {
            method: "POST",
            url,
            headers: &[("Content-Type", "application/json")],
            body,
        }
    }

    fn scope() -> SigningScope<'static> {
        SigningScope {
            region: "us-east-1",
            service: "rekognition",
            timestamp: timestamp(),
        }
    }

    fn header<'a>(headers: &'a SignedHeaders, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_uri_encode() {
        assert_eq!(uri_encode("abc-_.~XYZ09", true), "abc-_.~XYZ09");
        assert_eq!(uri_encode("a b:c", true), "a%20b%3Ac");
        assert_eq!(uri_encode("/model/x/invoke", false), "/model/x/invoke");
        assert_eq!(uri_encode("a/b", true), "a%2Fb");
        assert_eq!(uri_encode("%3A", false), "%253A");
    }

    #[test]
    fn test_canonical_uri_double_encodes() {
        let url: Url = "https://bedrock-runtime.us-east-1.amazonaws.com/model/m%3A0/invoke"
            .parse()
            .unwrap();
        assert_eq!(canonical_uri(&url), "/model/m%253A0/invoke");

        let root: Url = "https://rekognition.us-east-1.amazonaws.com".parse().unwrap();
        assert_eq!(canonical_uri(&root), "/");
    }

    #[test]
    fn test_canonical_query_is_sorted() {
        let url: Url = "https://example.com/?b=2&a=1 x".parse().unwrap();
        assert_eq!(canonical_query(&url), "a=1%20x&b=2");
    }

    #[test]
    fn test_host_header_keeps_explicit_port() {
        let url: Url = "http://localhost:4566/".parse().unwrap();
        assert_eq!(host_header(&url), "localhost:4566");

        let url: Url = "https://rekognition.us-east-1.amazonaws.com/".parse().unwrap();
        assert_eq!(host_header(&url), "rekognition.us-east-1.amazonaws.com");
    }

    #[test]
    fn test_signing_key_is_stable() {
        let first = signing_key("secret", "20150830", "us-east-1", "iam");
        let second = signing_key("secret", "20150830", "us-east-1", "iam");
        let other_day = signing_key("secret", "20150831", "us-east-1", "iam");

        assert_eq!(first.len(), 32);
        assert_eq!(first, second);
        assert_ne!(first, other_day);
    }

    #[test]
    fn test_sign_produces_authorization() {
        let url: Url = "https://rekognition.us-east-1.amazonaws.com/".parse().unwrap();
        let credentials = AwsCredentials::new("AKIDEXAMPLE", "secret");

        let headers = sign(&credentials, scope(), request(&url, b"{}"));

        assert_eq!(header(&headers, "x-amz-date"), Some("20150830T123600Z"));
        assert_eq!(header(&headers, "x-amz-security-token"), None);

        let authorization = header(&headers, "authorization").unwrap();
        assert!(authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/rekognition/aws4_request, "
        ));
        assert!(authorization.contains("SignedHeaders=content-type;host;x-amz-date, "));

        let signature = authorization.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_depends_on_body() {
        let url: Url = "https://rekognition.us-east-1.amazonaws.com/".parse().unwrap();
        let credentials = AwsCredentials::new("AKIDEXAMPLE", "secret");

        let first = sign(&credentials, scope(), request(&url, b"{\"a\":1}"));
        let again = sign(&credentials, scope(), request(&url, b"{\"a\":1}"));
        let other = sign(&credentials, scope(), request(&url, b"{\"a\":2}"));

        assert_eq!(first, again);
        assert_ne!(
            header(&first, "authorization"),
            header(&other, "authorization")
        );
    }

    #[test]
    fn test_session_token_is_signed() {
        let url: Url = "https://rekognition.us-east-1.amazonaws.com/".parse().unwrap();
        let credentials = AwsCredentials::new("AKIDEXAMPLE", "secret").with_session_token("tok");

        let headers = sign(&credentials, scope(), request(&url, b"{}"));

        assert_eq!(header(&headers, "x-amz-security-token"), Some("tok"));
        assert!(
            header(&headers, "authorization")
                .unwrap()
                .contains("SignedHeaders=content-type;host;x-amz-date;x-amz-security-token")
        );
    }
}
