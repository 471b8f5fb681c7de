//! Desired-method resolution
//!
//! Maps the cart's composition to the fulfillment method that should be
//! active. There is no enforceable single method for empty or mixed carts;
//! mixed carts are expected to be blocked upstream, and this resolver must
//! not fail or guess when one slips through.

use cartgate_core::{CartMode, MethodId};
use cartgate_settings::Settings;

/// The fulfillment method implied by the cart composition
///
/// `None` unless both methods are configured: exclusive-only carts map to
/// method A, regular-only carts to method B, empty and mixed carts to none.
#[must_use]
pub fn desired_method(mode: CartMode, settings: &Settings) -> Option<MethodId> {
    if !settings.methods_configured() {
        return None;
    }

    match mode {
        CartMode::ExclusiveOnly => Some(settings.method_a.clone()),
        CartMode::RegularOnly => Some(settings.method_b.clone()),
        CartMode::Empty | CartMode::Mixed => None,
    }
}
