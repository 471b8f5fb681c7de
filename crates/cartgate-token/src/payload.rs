//! Canonical clear-and-add payloads
//!
//! The authenticity tag is derived from the payload's serialized form, so the
//! payload must serialize identically for identical logical selections:
//! quantity is floored to 1, attribute keys are normalized, values cleaned,
//! and the map is kept sorted ascending by key (`BTreeMap` invariant).

use crate::error::TokenError;
use cartgate_core::{ProductId, VariationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical description of "clear the cart, then add this exact item"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearAddPayload {
    /// Product to add after clearing
    #[serde(rename = "product_id")]
    pub product: ProductId,
    /// Selected variation, zero when none
    #[serde(rename = "variation_id")]
    pub variation: VariationId,
    /// Units to add; always at least 1
    pub quantity: u32,
    /// Normalized variation attribute selections, sorted by key
    pub variations: BTreeMap<String, String>,
}

impl ClearAddPayload {
    /// Build a canonical payload from raw selection data
    pub fn new(
        product: ProductId,
        variation: VariationId,
        quantity: u32,
        attributes: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            product,
            variation,
            quantity: quantity.max(1),
            variations: normalize_attributes(attributes),
        }
    }

    /// The canonical serialized form the authenticity tag is derived from
    ///
    /// Field order is fixed by the struct declaration and the attribute map
    /// is sorted, so this is bit-exact reproducible from the same inputs.
    ///
    /// # Errors
    /// Returns [`TokenError::Serialize`] if JSON encoding fails.
    pub fn canonical_json(&self) -> Result<String, TokenError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Normalize a raw attribute map into its canonical form
///
/// Keys pass through [`normalize_key`], values through [`clean_value`];
/// entries whose key normalizes to empty are dropped. Idempotent: a
/// normalized map normalizes to itself.
pub fn normalize_attributes(
    attributes: impl IntoIterator<Item = (String, String)>,
) -> BTreeMap<String, String> {
    attributes
        .into_iter()
        .filter_map(|(key, value)| {
            let key = normalize_key(&key);
            (!key.is_empty()).then(|| (key, clean_value(&value)))
        })
        .collect()
}

/// Normalize an attribute key to its safe-key form
///
/// Lowercases and retains only `[a-z0-9_-]`, the character set the host uses
/// for attribute slugs.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Clean an attribute value for canonical serialization
///
/// Strips control characters and trims surrounding whitespace.
#[must_use]
pub fn clean_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}
