//! Keyed authenticity tags
//!
//! The tag is an HMAC-SHA256 over the canonical payload serialization,
//! prefixed with an action namespace so a tag minted for `clear_add` can
//! never authenticate a different action.

use crate::error::TokenError;
use crate::payload::ClearAddPayload;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Domain separation for the clear-and-add action
const ACTION_NAMESPACE: &[u8] = b"cartgate:clear_add:";

/// Host-provided secret key for tag derivation
///
/// The host owns rotation; rotating the key invalidates all outstanding
/// links, which is the intended expiry mechanism.
#[derive(Clone)]
pub struct TokenKey(Vec<u8>);

impl TokenKey {
    /// Wrap host-provided secret bytes
    #[inline]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.0).map_err(|e| TokenError::Mac(e.to_string()))
    }
}

impl std::fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print key material
        f.debug_tuple("TokenKey").field(&"..").finish()
    }
}

/// Derive the hex-encoded authenticity tag for a payload
///
/// # Errors
/// Returns [`TokenError::Serialize`] if the canonical serialization fails.
pub fn sign(payload: &ClearAddPayload, key: &TokenKey) -> Result<String, TokenError> {
    let canonical = payload.canonical_json()?;

    let mut mac = key.mac()?;
    mac.update(ACTION_NAMESPACE);
    mac.update(canonical.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a received tag against the payload reconstructed from the request
///
/// Recomputes the tag from the canonical serialization and compares in
/// constant time. No side effects; any malformed input verifies false.
#[must_use]
pub fn verify(tag: &str, payload: &ClearAddPayload, key: &TokenKey) -> bool {
    let Ok(canonical) = payload.canonical_json() else {
        return false;
    };
    let Ok(tag_bytes) = hex::decode(tag) else {
        return false;
    };
    let Ok(mut mac) = key.mac() else {
        return false;
    };

    mac.update(ACTION_NAMESPACE);
    mac.update(canonical.as_bytes());
    mac.verify_slice(&tag_bytes).is_ok()
}
