//! Exclusive-category resolution and product classification
//!
//! [`CategorySet`] is the configured root category plus all of its
//! descendants. [`Classifier`] memoizes that set for the lifetime of one
//! request and answers membership queries for products and variations.

use crate::catalog::CatalogProvider;
use crate::ids::{CategoryId, ProductId, VariationId};
use once_cell::unsync::OnceCell;
use std::collections::HashSet;

/// The set of category ids considered "exclusive"
///
/// Invariant: empty when the configured root is unset; otherwise contains the
/// root plus its transitive descendants, deduplicated.
#[derive(Debug, Clone, Default)]
pub struct CategorySet {
    ids: HashSet<CategoryId>,
}

impl CategorySet {
    /// The empty set (feature disabled)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve the set from a configured root
    ///
    /// Unset roots resolve to the empty set without consulting the catalog.
    #[must_use]
    pub fn resolve<C>(root: CategoryId, catalog: &C) -> Self
    where
        C: CatalogProvider + ?Sized,
    {
        if !root.is_set() {
            return Self::empty();
        }

        let mut ids: HashSet<CategoryId> = HashSet::new();
        ids.insert(root);
        ids.extend(
            catalog
                .category_descendants(root)
                .into_iter()
                .filter(CategoryId::is_set),
        );

        Self { ids }
    }

    /// True when no exclusive category is configured
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of categories in the set
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Membership test
    #[inline]
    #[must_use]
    pub fn contains(&self, category: CategoryId) -> bool {
        self.ids.contains(&category)
    }
}

/// Per-request product classifier
///
/// Holds the configured root and resolves the [`CategorySet`] lazily, at most
/// once. Construct one classifier per logical request and drop it with the
/// request: category assignments can change between requests, so the set
/// must never outlive the request that resolved it.
#[derive(Debug)]
pub struct Classifier<'a, C: CatalogProvider + ?Sized> {
    catalog: &'a C,
    root: CategoryId,
    set: OnceCell<CategorySet>,
}

impl<'a, C: CatalogProvider + ?Sized> Classifier<'a, C> {
    /// Create a classifier for one request
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a C, root: CategoryId) -> Self {
        Self {
            catalog,
            root,
            set: OnceCell::new(),
        }
    }

    /// The catalog this classifier reads from
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &'a C {
        self.catalog
    }

    /// True when an exclusive category is configured
    #[inline]
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.root.is_set()
    }

    /// The resolved category set, computing it on first use
    #[must_use]
    pub fn category_set(&self) -> &CategorySet {
        self.set
            .get_or_init(|| CategorySet::resolve(self.root, self.catalog))
    }

    /// Classify a product (or variation) as exclusive or not
    ///
    /// Always false when the category set is empty. When `variation` is set
    /// and resolves to a parent product, membership is checked against the
    /// parent, not the variation itself. Idempotent and side-effect free.
    #[must_use]
    pub fn is_exclusive(&self, product: ProductId, variation: VariationId) -> bool {
        let set = self.category_set();
        if set.is_empty() {
            return false;
        }

        let mut subject = product;
        if variation.is_set() {
            if let Some(parent) = self.catalog.variation_parent(variation) {
                if parent.is_set() {
                    subject = parent;
                }
            }
        }

        if !subject.is_set() {
            return false;
        }

        self.catalog
            .product_categories(subject)
            .iter()
            .any(|category| set.contains(*category))
    }
}
