//! Typed settings model

use crate::sanitize;
use crate::store::{keys, SettingsStore};
use cartgate_core::{CategoryId, MethodId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How composition conflicts are resolved when advisory mode is off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolveMode {
    /// Deny the mutation outright
    #[default]
    Block,
    /// Deny, but offer a signed clear-cart-and-retry link
    ClearAndAdd,
}

impl ResolveMode {
    /// External string representation used by the settings store
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::ClearAndAdd => "clear_add",
        }
    }
}

/// Raw value did not name a known resolve mode
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized resolve mode: '{0}'")]
pub struct ResolveModeParseError(pub String);

impl FromStr for ResolveMode {
    type Err = ResolveModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Self::Block),
            "clear_add" => Ok(Self::ClearAndAdd),
            other => Err(ResolveModeParseError(other.to_string())),
        }
    }
}

/// The six configuration values, post-sanitization
///
/// Mutated only by the host's administrative surface; read-only to the rule
/// engine. Method ids, when non-empty, are opaque identifiers owned by the
/// host shipping system; only their non-emptiness ("configured") matters
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Root of the exclusive category set; unset disables classification
    pub exclusive_category: CategoryId,
    /// Fulfillment method for exclusive-only carts
    pub method_a: MethodId,
    /// Fulfillment method for regular-only carts
    pub method_b: MethodId,
    /// Force the desired method onto the session at sync points
    pub autoselect: bool,
    /// Remove the competing method from offer sets when the desired one is present
    pub hide_other: bool,
    /// Advisory ("test") mode: log and notify, never block or mutate
    pub advisory: bool,
    /// Conflict resolution policy
    pub resolve_mode: ResolveMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclusive_category: CategoryId::UNSET,
            method_a: MethodId::default(),
            method_b: MethodId::default(),
            autoselect: true,
            hide_other: true,
            advisory: false,
            resolve_mode: ResolveMode::Block,
        }
    }
}

impl Settings {
    /// Load settings from the store, applying defaults and sanitizers
    ///
    /// Never fails: missing keys fall back to their documented defaults and
    /// malformed values are coerced by the sanitizers.
    #[must_use]
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let raw = |key: &str| store.get(key).unwrap_or_default();

        Self {
            exclusive_category: sanitize::category_id(&raw(keys::EXCLUSIVE_CATEGORY)),
            method_a: sanitize::method_id(&raw(keys::METHOD_A)),
            method_b: sanitize::method_id(&raw(keys::METHOD_B)),
            autoselect: store
                .get(keys::AUTOSELECT)
                .map_or(true, |v| sanitize::toggle(&v)),
            hide_other: store
                .get(keys::HIDE_OTHER)
                .map_or(true, |v| sanitize::toggle(&v)),
            advisory: store
                .get(keys::ADVISORY)
                .is_some_and(|v| sanitize::toggle(&v)),
            resolve_mode: sanitize::resolve_mode(&raw(keys::RESOLVE_MODE)),
        }
    }

    /// Write settings back through the sanitizing boundary
    ///
    /// The external representation is the same one [`Settings::load`]
    /// accepts, so a persist/load round trip is identity.
    pub fn persist<S: SettingsStore + ?Sized>(&self, store: &mut S) {
        store.set(keys::EXCLUSIVE_CATEGORY, &self.exclusive_category.to_string());
        store.set(keys::METHOD_A, sanitize::method_id(self.method_a.as_str()).as_str());
        store.set(keys::METHOD_B, sanitize::method_id(self.method_b.as_str()).as_str());
        store.set(keys::AUTOSELECT, toggle_str(self.autoselect));
        store.set(keys::HIDE_OTHER, toggle_str(self.hide_other));
        store.set(keys::ADVISORY, toggle_str(self.advisory));
        store.set(keys::RESOLVE_MODE, self.resolve_mode.as_str());
    }

    /// True when an exclusive category is configured
    #[inline]
    #[must_use]
    pub fn category_configured(&self) -> bool {
        self.exclusive_category.is_set()
    }

    /// True when both fulfillment methods are configured
    #[inline]
    #[must_use]
    pub fn methods_configured(&self) -> bool {
        !self.method_a.is_empty() && !self.method_b.is_empty()
    }

    /// The configured method that is not the desired one
    ///
    /// Returns `None` when the competing method is unconfigured or `desired`
    /// is neither configured method.
    #[must_use]
    pub fn wrong_method(&self, desired: &MethodId) -> Option<MethodId> {
        let wrong = if desired == &self.method_a {
            self.method_b.clone()
        } else if desired == &self.method_b {
            self.method_a.clone()
        } else {
            return None;
        };

        (!wrong.is_empty()).then_some(wrong)
    }
}

fn toggle_str(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
