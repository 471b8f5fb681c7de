//! Cartgate Token
//!
//! Deterministic, tamper-evident "clear the cart and add exactly this item"
//! tokens, used by the clear-and-add conflict resolution path.
//!
//! # Core Operations
//!
//! - **Canonicalize**: [`ClearAddPayload`] normalizes an item selection into
//!   a bit-exact reproducible form
//! - **Sign**: [`sign`] derives a keyed authenticity tag over the canonical
//!   serialization, scoped to the `clear_add` action namespace
//! - **Transport**: [`query`] encodes the payload and tag as a cart-page
//!   query string and parses them back out of a redirect request
//!
//! The token built at offer time must verify at redirect time, so every step
//! here is deterministic: same logical selection, same bytes, same tag.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod payload;
pub mod query;
pub mod sign;

pub use error::TokenError;
pub use payload::{clean_value, normalize_attributes, normalize_key, ClearAddPayload};
pub use query::{build_url, parse_query, ClearAddRequest};
pub use sign::{sign, verify, TokenKey};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
