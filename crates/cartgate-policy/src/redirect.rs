//! Clear-and-add redirect handling
//!
//! Executes a verified clear-and-add link: empty the cart, add the described
//! item, report the outcome, and redirect back to the cart page. The handler
//! is one-shot: the destructive clear happens before the add is attempted,
//! so a failed add leaves an empty cart by contract. It always ends in a
//! redirect; the host must stop all further processing for the request once
//! it receives one.

use crate::log;
use crate::notice::{NoticeLog, Severity};
use cartgate_core::{CatalogProvider, ProductId, VariationId};
use cartgate_token::{ClearAddRequest, TokenKey};
use std::collections::BTreeMap;

/// Mutating cart operations provided by the host
pub trait CartOps {
    /// Remove every line item from the cart
    fn clear(&mut self);

    /// Attempt to add a product; true on success
    fn add(
        &mut self,
        product: ProductId,
        quantity: u32,
        variation: VariationId,
        attributes: &BTreeMap<String, String>,
    ) -> bool;
}

/// Instruction to the host to redirect and stop processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Destination, always the cart page
    pub url: String,
}

pub(crate) const LINK_EXPIRED_MESSAGE: &str =
    "The secure action link has expired. Please try again.";

pub(crate) const UNPROCESSABLE_MESSAGE: &str = "Unable to process the selected product.";

pub(crate) const CLEARED_AND_ADDED_MESSAGE: &str =
    "Cart cleared and the selected item was added.";

pub(crate) const CLEARED_NOT_ADDED_MESSAGE: &str =
    "Cart was cleared, but the item could not be added.";

/// Execute a parsed clear-and-add request
///
/// Verification failures and malformed requests take no cart-mutating action.
/// A failed add is retried once with the variation's recorded attributes when
/// the request named a variation but carried no explicit attributes.
pub(crate) fn handle_clear_add<C>(
    request: &ClearAddRequest,
    catalog: &C,
    cart: &mut dyn CartOps,
    notices: &mut NoticeLog,
    key: &TokenKey,
    cart_url: &str,
) -> Redirect
where
    C: CatalogProvider + ?Sized,
{
    let redirect = Redirect {
        url: cart_url.to_string(),
    };

    if !request.verify(key) {
        notices.push_once(LINK_EXPIRED_MESSAGE, Severity::Error);
        return redirect;
    }

    if !request.product.is_set() || request.quantity == 0 {
        notices.push_once(UNPROCESSABLE_MESSAGE, Severity::Error);
        return redirect;
    }

    cart.clear();
    let mut added = cart.add(
        request.product,
        request.quantity,
        request.variation,
        &request.variations,
    );

    // The host's catalog layer can fail an attribute-less variation add;
    // retry once with the attributes recorded on the variation itself.
    if !added && request.variation.is_set() && request.variations.is_empty() {
        let recorded = catalog.variation_attributes(request.variation);
        if !recorded.is_empty() {
            added = cart.add(request.product, request.quantity, request.variation, &recorded);
        }
    }

    if added {
        notices.push_once(CLEARED_AND_ADDED_MESSAGE, Severity::Success);
        log::always_info("clear-and-add link used successfully");
    } else {
        notices.push_once(CLEARED_NOT_ADDED_MESSAGE, Severity::Error);
        log::always_warn("clear-and-add link failed to add product");
    }

    redirect
}
