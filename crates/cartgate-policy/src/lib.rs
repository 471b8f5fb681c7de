//! Cartgate Policy
//!
//! The decision engine invoked at the host's cart extension points:
//!
//! - **Admission**: allow / advise / deny / deny-with-reset for every
//!   attempted cart mutation, plus the whole-cart safety net
//! - **Reconciliation**: forcing the desired fulfillment method onto the
//!   session and filtering competing rates out of offer sets
//! - **Redirect handling**: executing verified clear-and-add links
//!
//! # Architecture
//!
//! ```text
//! Host hooks → Gate ─┬→ Classifier / cart_mode        (cartgate-core)
//!                    ├→ desired_method                 (method)
//!                    ├→ admission table                 (admission)
//!                    ├→ sync / filter passes            (reconcile)
//!                    └→ clear-and-add handler           (redirect)
//! ```
//!
//! One [`Gate`] is constructed per request and dropped with it; notices
//! accumulate on the gate, session state is only ever written by the
//! reconciliation passes. Nothing in this crate panics or returns a hard
//! failure to the host; the worst outcome is a degraded (no enforcement) or
//! denied (blocked mutation) decision.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod admission;
pub mod gate;
mod log;
pub mod method;
pub mod notice;
pub mod reconcile;
pub mod redirect;
pub mod session;

pub use admission::{admission, AddDecision, Admission, CartCheck};
pub use gate::Gate;
pub use method::desired_method;
pub use notice::{Notice, NoticeLog, Severity};
pub use reconcile::Package;
pub use redirect::{CartOps, Redirect};
pub use session::SessionStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
