//! Cartgate Core
//!
//! Classification primitives for category-exclusive carts:
//!
//! - **Identifiers**: strongly-typed catalog and fulfillment ids
//! - **Catalog seam**: the read-only [`CatalogProvider`] trait the host implements
//! - **Classification**: [`CategorySet`] resolution and the per-request [`Classifier`]
//! - **Composition**: [`CartMode`] derivation over cart line items
//!
//! # Architecture
//!
//! ```text
//! Host catalog → CatalogProvider → CategorySet → Classifier → CartMode
//!                                       ↑ resolved once per request
//! ```
//!
//! Everything in this crate is a pure, synchronous computation over the
//! host-provided catalog view. Nothing here mutates state or performs I/O.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cart;
pub mod catalog;
pub mod category;
pub mod ids;

pub use cart::{cart_mode, CartMode, ItemClass, LineItem};
pub use catalog::CatalogProvider;
pub use category::{CategorySet, Classifier};
pub use ids::{CategoryId, MethodId, ProductId, VariationId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
