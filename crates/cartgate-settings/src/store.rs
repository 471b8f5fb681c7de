//! Settings store seam
//!
//! The host persists configuration in a generic string key-value options
//! store. Cartgate reads and writes through [`SettingsStore`] only; typing
//! and validation happen in [`crate::model`] and [`crate::sanitize`].

/// Persisted option keys and their documented defaults
pub mod keys {
    /// Exclusive category root id; default `0` (unset)
    pub const EXCLUSIVE_CATEGORY: &str = "cartgate_exclusive_category_id";
    /// Method for exclusive-only carts; default empty
    pub const METHOD_A: &str = "cartgate_method_a";
    /// Method for regular-only carts; default empty
    pub const METHOD_B: &str = "cartgate_method_b";
    /// Auto-select toggle; default `yes`
    pub const AUTOSELECT: &str = "cartgate_autoselect";
    /// Hide-other-method toggle; default `yes`
    pub const HIDE_OTHER: &str = "cartgate_hide_other";
    /// Advisory (test) mode toggle; default `no`
    pub const ADVISORY: &str = "cartgate_advisory_mode";
    /// Conflict resolution mode; default `block`
    pub const RESOLVE_MODE: &str = "cartgate_resolve_mode";
}

/// Generic key-value options interface provided by the host
pub trait SettingsStore {
    /// Read a raw option value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a raw option value
    fn set(&mut self, key: &str, value: &str);
}

/// Seed every missing key with its documented default
///
/// Existing values are never overwritten; safe to run on every activation.
pub fn ensure_defaults<S: SettingsStore + ?Sized>(store: &mut S) {
    let defaults = [
        (keys::EXCLUSIVE_CATEGORY, "0"),
        (keys::METHOD_A, ""),
        (keys::METHOD_B, ""),
        (keys::AUTOSELECT, "yes"),
        (keys::HIDE_OTHER, "yes"),
        (keys::ADVISORY, "no"),
        (keys::RESOLVE_MODE, "block"),
    ];

    for (key, default) in defaults {
        if store.get(key).is_none() {
            store.set(key, default);
        }
    }
}
