//! Webhook signature verification.
//!
//! Inbound events carry an HMAC-SHA256 of the raw request body,
//! base64-encoded, in the `X-Webhook-Signature` header. Verification
//! recomputes the digest with the shared secret and compares in
//! constant time.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Signature verification errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The signature header was absent or empty.
    #[error("missing signature header")]
    MissingSignature,
    /// The signature did not match the request body.
    #[error("invalid signature")]
    VerificationFailed,
    /// The configured secret could not key the MAC.
    #[error("invalid secret key")]
    InvalidSecret,
}

/// Computes the base64-encoded HMAC-SHA256 signature of a payload.
///
/// # Errors
///
/// Returns `SignatureError::InvalidSecret` if the secret cannot key the
/// MAC.
pub fn generate_signature(payload: &[u8], secret: &str) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::InvalidSecret)?;

    mac.update(payload);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Verifies a webhook signature against the raw request body.
///
/// # Errors
///
/// - `MissingSignature` if the header value is empty
/// - `VerificationFailed` if the signature does not match
/// - `InvalidSecret` if the secret cannot key the MAC
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> Result<(), SignatureError> {
    if signature.is_empty() {
        return Err(SignatureError::MissingSignature);
    }

    let expected = generate_signature(payload, secret)?;

    if timing_safe_eq(signature, &expected) {
        Ok(())
    } else {
        Err(SignatureError::VerificationFailed)
    }
}

/// Timing-safe string comparison to prevent timing attacks.
fn timing_safe_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.as_bytes().iter().zip(b.as_bytes()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}
