//! Testing utilities for the Cartgate workspace
//!
//! In-memory fakes for the host seams: catalog, settings store, session and
//! cart.

#![allow(missing_docs)]

use cartgate_core::{CatalogProvider, CategoryId, LineItem, MethodId, ProductId, VariationId};
use cartgate_policy::{CartOps, SessionStore};
use cartgate_settings::SettingsStore;
use std::collections::{BTreeMap, HashMap, HashSet};

/// In-memory catalog with a category tree, product assignments and variations
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    children: HashMap<CategoryId, Vec<CategoryId>>,
    product_categories: HashMap<ProductId, Vec<CategoryId>>,
    variation_parents: HashMap<VariationId, ProductId>,
    variation_attributes: HashMap<VariationId, BTreeMap<String, String>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `child` as a direct child category of `parent`
    pub fn add_child_category(&mut self, parent: u64, child: u64) {
        self.children
            .entry(CategoryId::new(parent))
            .or_default()
            .push(CategoryId::new(child));
    }

    /// Assign a product to the given categories
    pub fn assign_product(&mut self, product: u64, categories: &[u64]) {
        self.product_categories.insert(
            ProductId::new(product),
            categories.iter().copied().map(CategoryId::new).collect(),
        );
    }

    /// Register a variation of `parent` with its recorded attributes
    pub fn add_variation(&mut self, variation: u64, parent: u64, attributes: &[(&str, &str)]) {
        self.variation_parents
            .insert(VariationId::new(variation), ProductId::new(parent));
        self.variation_attributes.insert(
            VariationId::new(variation),
            attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
    }
}

impl CatalogProvider for MemoryCatalog {
    fn category_descendants(&self, root: CategoryId) -> Vec<CategoryId> {
        let mut seen: HashSet<CategoryId> = HashSet::new();
        let mut queue = vec![root];
        while let Some(current) = queue.pop() {
            for child in self.children.get(&current).into_iter().flatten() {
                if seen.insert(*child) {
                    queue.push(*child);
                }
            }
        }
        seen.into_iter().collect()
    }

    fn product_categories(&self, product: ProductId) -> Vec<CategoryId> {
        self.product_categories
            .get(&product)
            .cloned()
            .unwrap_or_default()
    }

    fn variation_parent(&self, variation: VariationId) -> Option<ProductId> {
        self.variation_parents.get(&variation).copied()
    }

    fn variation_attributes(&self, variation: VariationId) -> BTreeMap<String, String> {
        self.variation_attributes
            .get(&variation)
            .cloned()
            .unwrap_or_default()
    }
}

/// In-memory settings store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// In-memory session
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    chosen: HashMap<usize, MethodId>,
    missing: bool,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn chosen_method(&self, package: usize) -> Option<MethodId> {
        self.chosen.get(&package).cloned()
    }

    fn set_chosen_method(&mut self, package: usize, method: MethodId) {
        self.chosen.insert(package, method);
    }

    fn missing_desired_rate(&self) -> bool {
        self.missing
    }

    fn set_missing_desired_rate(&mut self, missing: bool) {
        self.missing = missing;
    }
}

/// One recorded add attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAttempt {
    pub product: ProductId,
    pub quantity: u32,
    pub variation: VariationId,
    pub attributes: BTreeMap<String, String>,
}

/// In-memory cart recording every mutation
///
/// Adds succeed unless the variation is listed in
/// `reject_without_attributes` and the attempt carries no attributes, which
/// models the host catalog's attribute-resolution failure mode.
#[derive(Debug, Clone, Default)]
pub struct MemoryCart {
    pub items: Vec<LineItem>,
    pub attempts: Vec<AddAttempt>,
    pub cleared: u32,
    pub reject_without_attributes: HashSet<VariationId>,
}

impl MemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<LineItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Make attribute-less adds of this variation fail
    pub fn reject_without_attributes(&mut self, variation: u64) {
        self.reject_without_attributes
            .insert(VariationId::new(variation));
    }
}

impl CartOps for MemoryCart {
    fn clear(&mut self) {
        self.items.clear();
        self.cleared += 1;
    }

    fn add(
        &mut self,
        product: ProductId,
        quantity: u32,
        variation: VariationId,
        attributes: &BTreeMap<String, String>,
    ) -> bool {
        self.attempts.push(AddAttempt {
            product,
            quantity,
            variation,
            attributes: attributes.clone(),
        });

        if attributes.is_empty() && self.reject_without_attributes.contains(&variation) {
            return false;
        }

        self.items.push(LineItem::new(product, variation, quantity));
        true
    }
}
