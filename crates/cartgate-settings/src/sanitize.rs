//! Boundary sanitizers
//!
//! Settings values arrive from an administrative form and are duck-typed
//! strings until proven otherwise. These functions are total: every input
//! coerces to a well-formed value, falling back to the documented defaults.

use crate::model::ResolveMode;
use cartgate_core::{CategoryId, MethodId};

/// Integer-or-zero coercion for the exclusive category id
///
/// Anything that does not parse as a positive integer becomes the unset id.
#[must_use]
pub fn category_id(raw: &str) -> CategoryId {
    raw.trim()
        .parse::<u64>()
        .map_or(CategoryId::UNSET, CategoryId::new)
}

/// Trimmed opaque string for fulfillment method ids
#[must_use]
pub fn method_id(raw: &str) -> MethodId {
    MethodId::new(raw.trim())
}

/// Truthy-token coercion for checkbox toggles
///
/// Accepts the host form's token set; everything else is false.
#[must_use]
pub fn toggle(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true" | "yes" | "on")
}

/// Enum-restricted coercion for the resolve mode
///
/// Unrecognized values default to [`ResolveMode::Block`].
#[must_use]
pub fn resolve_mode(raw: &str) -> ResolveMode {
    raw.trim().parse().unwrap_or_default()
}
