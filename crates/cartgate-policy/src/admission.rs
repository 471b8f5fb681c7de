//! Admission policy
//!
//! The transition table consulted on every attempted cart mutation, plus the
//! whole-cart safety net for paths that bypass add-time validation (direct
//! session manipulation, restored carts). The table itself is pure; outcome
//! branching on advisory/resolve-mode settings happens in [`crate::gate`].

use cartgate_core::{CartMode, ItemClass};

/// Verdict of the pure admission table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The mutation keeps the cart uniform
    Allow,
    /// The mutation would mix exclusive and regular items
    Conflict,
}

/// Decide whether adding an item of `incoming` class to a cart in
/// `current` mode keeps it valid
///
/// Empty carts accept anything; uniform carts accept only their own class.
/// A cart that is already mixed conflicts with any further add; the add-time
/// check cannot repair it and must not make it worse.
#[must_use]
pub fn admission(current: CartMode, incoming: ItemClass) -> Admission {
    match current {
        CartMode::Empty => Admission::Allow,
        CartMode::Mixed => Admission::Conflict,
        CartMode::ExclusiveOnly | CartMode::RegularOnly => {
            if current.uniform_class() == Some(incoming) {
                Admission::Allow
            } else {
                Admission::Conflict
            }
        }
    }
}

/// Outcome of add-time validation, as reported to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddDecision {
    /// Mutation permitted
    Allow,
    /// Conflict observed, mutation permitted anyway (advisory mode)
    AllowAdvised,
    /// Mutation denied
    Deny,
    /// Mutation denied; a signed clear-and-add link was offered
    DenyWithReset {
        /// Remediation URL embedded in the blocking notice
        url: String,
    },
}

impl AddDecision {
    /// Whether the host should let the mutation proceed
    #[inline]
    #[must_use]
    pub fn permitted(&self) -> bool {
        matches!(self, Self::Allow | Self::AllowAdvised)
    }
}

/// Outcome of the whole-cart safety net
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartCheck {
    /// Cart composition is valid (or the feature is disabled)
    Pass,
    /// Mixed cart observed, advisory mode let it through
    Advised,
    /// Mixed cart observed and reported as blocking
    Blocked,
}

/// Blocking notice text for a conflicting add
pub(crate) fn mixing_message(incoming: ItemClass) -> &'static str {
    match incoming {
        ItemClass::Exclusive => {
            "This product is configured for Location A pickup, but your cart currently \
             contains Location B pickup products. Please place separate orders."
        }
        ItemClass::Regular => {
            "This product is configured for Location B pickup, but your cart currently \
             contains Location A pickup products. Please place separate orders."
        }
    }
}

/// Blocking notice text for an already-mixed cart
pub(crate) const MIXED_CART_MESSAGE: &str =
    "Your cart contains products for both pickup locations. Please place separate \
     orders for Location A and Location B pickups.";
