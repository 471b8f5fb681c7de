//! Session seam
//!
//! Typed facade over the host's session-scoped key-value store. Only two
//! pieces of session state exist: the chosen fulfillment method per shipment
//! package and the missing-desired-rate flag. The reconciliation passes are
//! the sole writers; everything else reads.

use cartgate_core::MethodId;

/// Session-scoped state owned by the host
pub trait SessionStore {
    /// The chosen fulfillment method for a shipment package, if any
    fn chosen_method(&self, package: usize) -> Option<MethodId>;

    /// Record the chosen fulfillment method for a shipment package
    fn set_chosen_method(&mut self, package: usize, method: MethodId);

    /// Whether the desired rate was found missing during reconciliation
    fn missing_desired_rate(&self) -> bool;

    /// Record availability of the desired rate
    fn set_missing_desired_rate(&mut self, missing: bool);
}
