//! Cart composition analysis
//!
//! Reduces the current cart line items to a [`CartMode`] by classifying each
//! item through the [`Classifier`]. The mode is a derived value: recomputed
//! on demand, never stored.

use crate::catalog::CatalogProvider;
use crate::category::Classifier;
use crate::ids::{ProductId, VariationId};
use serde::{Deserialize, Serialize};

/// One cart row, as read from the host cart
///
/// Owned by the external cart; read-only to cartgate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product in the row; unset when the reference did not resolve
    pub product: ProductId,
    /// Selected variation, if any
    pub variation: VariationId,
    /// Units of the product in the row
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item
    #[inline]
    #[must_use]
    pub const fn new(product: ProductId, variation: VariationId, quantity: u32) -> Self {
        Self {
            product,
            variation,
            quantity,
        }
    }

    /// A single-unit, variation-less line item
    #[inline]
    #[must_use]
    pub const fn simple(product: ProductId) -> Self {
        Self::new(product, VariationId::NONE, 1)
    }
}

/// Classification of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemClass {
    /// Member of the exclusive category set
    Exclusive,
    /// Everything else
    Regular,
}

/// Composition of the whole cart
///
/// `Mixed` iff the cart holds at least one exclusive and one regular item;
/// `Empty` iff no line items are classifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartMode {
    /// No classifiable items
    Empty,
    /// Only exclusive-classified items
    ExclusiveOnly,
    /// Only regular items
    RegularOnly,
    /// Both classes present
    Mixed,
}

impl CartMode {
    /// True for the mixed (invalid) composition
    #[inline]
    #[must_use]
    pub const fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed)
    }

    /// True when the cart has no classifiable items
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The single item class of a uniform cart, if it has one
    #[inline]
    #[must_use]
    pub const fn uniform_class(&self) -> Option<ItemClass> {
        match self {
            Self::ExclusiveOnly => Some(ItemClass::Exclusive),
            Self::RegularOnly => Some(ItemClass::Regular),
            Self::Empty | Self::Mixed => None,
        }
    }
}

/// Derive the cart mode from the current line items
///
/// Pure function of `(items, category set)`. Items with an unresolved product
/// reference are skipped, not counted as either class. Short-circuits as soon
/// as both classes have been observed.
#[must_use]
pub fn cart_mode<C>(items: &[LineItem], classifier: &Classifier<'_, C>) -> CartMode
where
    C: CatalogProvider + ?Sized,
{
    let mut has_exclusive = false;
    let mut has_regular = false;

    for item in items {
        if !item.product.is_set() {
            continue;
        }

        if classifier.is_exclusive(item.product, item.variation) {
            has_exclusive = true;
        } else {
            has_regular = true;
        }

        if has_exclusive && has_regular {
            break;
        }
    }

    match (has_exclusive, has_regular) {
        (true, true) => CartMode::Mixed,
        (true, false) => CartMode::ExclusiveOnly,
        (false, true) => CartMode::RegularOnly,
        (false, false) => CartMode::Empty,
    }
}
