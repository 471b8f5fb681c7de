//! Strongly-typed identifiers
//!
//! The host platform deals in raw integers and strings; these newtypes keep
//! category, product, variation and fulfillment-method identifiers from being
//! confused for one another inside the decision logic.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A product-category identifier
///
/// Zero means "unset": no exclusive category is configured and the
/// classification feature is disabled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct CategoryId(pub u64);

impl CategoryId {
    /// The unset category id
    pub const UNSET: Self = Self(0);

    /// Create a new category id
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// True when this id refers to an actual category
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.0 != 0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product identifier
///
/// Zero means the cart row's product reference did not resolve; such rows are
/// skipped by classification rather than counted as either class.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ProductId(pub u64);

impl ProductId {
    /// The unresolved product id
    pub const UNSET: Self = Self(0);

    /// Create a new product id
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// True when this id refers to an actual product
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.0 != 0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product-variation identifier
///
/// Zero means the line item is a plain product with no variation selected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct VariationId(pub u64);

impl VariationId {
    /// No variation selected
    pub const NONE: Self = Self(0);

    /// Create a new variation id
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// True when a variation is selected
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.0 != 0
    }
}

impl Display for VariationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque fulfillment-method identifier (e.g. `"local_pickup:3"`)
///
/// Owned by the host shipping subsystem. Cartgate never validates that the
/// method exists, only that it is non-empty ("configured").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct MethodId(pub String);

impl MethodId {
    /// Create a new method id
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// True when no method is configured
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw identifier string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MethodId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MethodId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
