//! Catalog seam
//!
//! The host storefront owns the product catalog and its category taxonomy.
//! Cartgate only ever reads four facts from it, captured by
//! [`CatalogProvider`]. Implementations are expected to be cheap to call
//! repeatedly within one request.

use crate::ids::{CategoryId, ProductId, VariationId};
use std::collections::BTreeMap;

/// Read-only view of the host catalog
///
/// All methods take `&self`; the provider must not mutate catalog state on
/// behalf of cartgate. Category assignments may change between requests, so
/// callers must not hold results across request boundaries.
pub trait CatalogProvider {
    /// All transitive descendant categories of `root`, excluding `root` itself
    ///
    /// An unknown or childless root yields an empty vector.
    fn category_descendants(&self, root: CategoryId) -> Vec<CategoryId>;

    /// Categories the given product is assigned to
    fn product_categories(&self, product: ProductId) -> Vec<CategoryId>;

    /// Parent product of a variation, if the variation resolves
    fn variation_parent(&self, variation: VariationId) -> Option<ProductId>;

    /// The attribute selections recorded on a variation
    ///
    /// Used by the clear-and-add retry path when a variation was requested
    /// without explicit attributes.
    fn variation_attributes(&self, variation: VariationId) -> BTreeMap<String, String>;
}
