//! Signature algorithm and verification for subscription callbacks.
//!
//! The service signs every real-time update it POSTs to a subscription
//! callback URL. The header carries the hex-encoded HMAC-SHA1 of the raw
//! request body, keyed with the application's client secret:
//!
//! ```text
//! X-Hub-Signature: {hex(HMAC-SHA1(client_secret, body))}
//! ```
//!
//! Verification must run over the body bytes exactly as received, before any
//! JSON parsing or re-serialization.

/// Header name carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

/// Optional algorithm prefix some proxies add in front of the digest.
const ALGORITHM_PREFIX: &str = "sha1=";

/// Reasons a callback signature is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// No signature, or an empty one, was supplied.
    #[error("missing signature")]
    Missing,
    #[error("signature is not hex encoded")]
    InvalidEncoding,
    #[error("signature mismatch")]
    Mismatch,
}

impl From<ring::error::Unspecified> for SignatureError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::Mismatch
    }
}

fn key(secret: &[u8]) -> ring::hmac::Key {
    ring::hmac::Key::new(ring::hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, secret)
}

/// Compute the lowercase hex signature the service would send for `payload`.
pub fn sign_payload(payload: &[u8], secret: &[u8]) -> String {
    hex::encode(ring::hmac::sign(&key(secret), payload))
}

/// Verify a signature header value against the raw payload.
///
/// `None` and empty values are rejected: a caller that wants to skip
/// verification must not call this at all. The digest comparison is
/// constant-time.
pub fn verify_signature(
    payload: &[u8],
    signature: Option<&str>,
    secret: &[u8],
) -> Result<(), SignatureError> {
    let signature = signature.map(str::trim).unwrap_or_default();
    let digest = signature
        .strip_prefix(ALGORITHM_PREFIX)
        .unwrap_or(signature);
    if digest.is_empty() {
        return Err(SignatureError::Missing);
    }

    let expected = hex::decode(digest).map_err(|_| SignatureError::InvalidEncoding)?;
    ring::hmac::verify(&key(secret), payload, &expected)?;
    Ok(())
}
