//! Query-string transport
//!
//! The remediation link is a query-string action descriptor on the cart page
//! URL:
//!
//! ```text
//! action=clear_add&product_id=<int>&variation_id=<int>&quantity=<int>
//!   &variations=<base64url of canonical JSON map>&token=<tag>
//! ```
//!
//! Every value is query-safe by construction (integers, hex, URL-safe
//! base64), so no percent-encoding layer is required.

use crate::error::TokenError;
use crate::payload::{normalize_attributes, ClearAddPayload};
use crate::sign::{sign, verify, TokenKey};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use cartgate_core::{ProductId, VariationId};
use std::collections::BTreeMap;

/// Query parameter names
mod param {
    pub(super) const ACTION: &str = "action";
    pub(super) const PRODUCT: &str = "product_id";
    pub(super) const VARIATION: &str = "variation_id";
    pub(super) const QUANTITY: &str = "quantity";
    pub(super) const VARIATIONS: &str = "variations";
    pub(super) const TOKEN: &str = "token";
}

/// The action value this codec handles
const CLEAR_ADD_ACTION: &str = "clear_add";

/// Build the signed remediation URL on the cart page
///
/// # Errors
/// Returns [`TokenError::Serialize`] if the payload cannot be serialized.
pub fn build_url(
    cart_url: &str,
    payload: &ClearAddPayload,
    key: &TokenKey,
) -> Result<String, TokenError> {
    let token = sign(payload, key)?;
    let variations = URL_SAFE_NO_PAD.encode(serde_json::to_string(&payload.variations)?);

    let separator = if cart_url.contains('?') { '&' } else { '?' };
    Ok(format!(
        "{cart_url}{separator}{}={CLEAR_ADD_ACTION}&{}={}&{}={}&{}={}&{}={variations}&{}={token}",
        param::ACTION,
        param::PRODUCT,
        payload.product,
        param::VARIATION,
        payload.variation,
        param::QUANTITY,
        payload.quantity,
        param::VARIATIONS,
        param::TOKEN,
    ))
}

/// A parsed clear-and-add redirect request
///
/// Carries the raw request fields; the canonical payload the token must
/// verify against is rebuilt on demand by [`ClearAddRequest::payload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearAddRequest {
    /// Requested product; unset when the field was missing or unparsable
    pub product: ProductId,
    /// Requested variation, zero when none
    pub variation: VariationId,
    /// Requested quantity as received; zero fails the handler's guards
    pub quantity: u32,
    /// Decoded attribute selections
    pub variations: BTreeMap<String, String>,
    /// Authenticity tag as received
    pub token: String,
}

impl ClearAddRequest {
    /// Parse a decoded query map; `None` when the request is not ours
    ///
    /// Field-level garbage is coerced, not rejected: unparsable ids and
    /// quantities become zero (failing the handler's guards later) and an
    /// undecodable attribute map becomes empty. Only a missing or foreign
    /// `action` makes this return `None`.
    #[must_use]
    pub fn from_query(query: &BTreeMap<String, String>) -> Option<Self> {
        if query.get(param::ACTION).map(String::as_str) != Some(CLEAR_ADD_ACTION) {
            return None;
        }

        let int = |name: &str| -> u64 {
            query
                .get(name)
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(0)
        };

        let variations = query
            .get(param::VARIATIONS)
            .map(|raw| decode_attributes(raw))
            .unwrap_or_default();

        Some(Self {
            product: ProductId::new(int(param::PRODUCT)),
            variation: VariationId::new(int(param::VARIATION)),
            quantity: u32::try_from(int(param::QUANTITY)).unwrap_or(0),
            variations,
            token: query.get(param::TOKEN).cloned().unwrap_or_default(),
        })
    }

    /// The canonical payload derivable from this request's fields
    ///
    /// This is exactly the form the received token was minted over, so a
    /// token minted for any other selection will not verify against it.
    #[must_use]
    pub fn payload(&self) -> ClearAddPayload {
        ClearAddPayload::new(
            self.product,
            self.variation,
            self.quantity,
            self.variations.clone(),
        )
    }

    /// Verify the received tag against the reconstructed payload
    #[must_use]
    pub fn verify(&self, key: &TokenKey) -> bool {
        verify(&self.token, &self.payload(), key)
    }
}

/// Decode the base64url attribute map; any failure yields the empty map
fn decode_attributes(raw: &str) -> BTreeMap<String, String> {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(raw) else {
        return BTreeMap::new();
    };
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
        return BTreeMap::new();
    };
    let Some(object) = value.as_object() else {
        return BTreeMap::new();
    };

    // keep scalar values only, mirroring the host's form semantics
    normalize_attributes(object.iter().filter_map(|(key, value)| {
        let scalar = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        Some((key.clone(), scalar))
    }))
}

/// Split a raw query string into a decoded parameter map
///
/// Minimal splitter for the parameter alphabet this crate emits; later
/// duplicates win, flag-style parameters map to the empty string.
#[must_use]
pub fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}
