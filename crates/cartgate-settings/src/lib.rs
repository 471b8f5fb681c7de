//! Cartgate Settings
//!
//! Typed read/validate access to the six persisted configuration values the
//! rule engine runs on. The host stores settings as untrusted strings behind
//! a generic key-value interface; everything crossing that boundary passes
//! through the sanitizers in [`sanitize`]. Enum-like external strings
//! (`"yes"`/`"no"`, `"block"`/`"clear_add"`) become real types here and
//! nowhere else.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod model;
pub mod sanitize;
pub mod store;

pub use model::{ResolveMode, ResolveModeParseError, Settings};
pub use store::{ensure_defaults, keys, SettingsStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
