//! Gate engine - main entry point
//!
//! One [`Gate`] is constructed per request and wired by a thin host adapter
//! to the platform's extension points (pre-add validation, cart validation,
//! rate filtering, session sync, redirect handling). The gate owns the
//! request-scoped classifier and notice log; session and cart state stay with
//! the host behind their seams.

use crate::admission::{admission, mixing_message, AddDecision, Admission, CartCheck, MIXED_CART_MESSAGE};
use crate::log;
use crate::notice::{Notice, NoticeLog, Severity};
use crate::reconcile::{self, Package};
use crate::redirect::{self, CartOps, Redirect};
use crate::session::SessionStore;
use cartgate_core::{
    cart_mode, CartMode, CatalogProvider, Classifier, ItemClass, LineItem, MethodId, ProductId,
    VariationId,
};
use cartgate_settings::{ResolveMode, Settings};
use cartgate_token::{build_url, ClearAddPayload, ClearAddRequest, TokenKey};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Advisory notice for an unavailable desired rate
pub(crate) const MISSING_RATE_MESSAGE: &str =
    "The pickup option for this cart is not available. Please check shipping zones \
     and pickup configuration.";

/// Per-request decision engine
///
/// Classification always happens before policy decisions and before
/// reconciliation; settings are read once at construction and are externally
/// immutable for the request's duration.
#[derive(Debug)]
pub struct Gate<'a, C: CatalogProvider + ?Sized> {
    settings: Settings,
    classifier: Classifier<'a, C>,
    notices: NoticeLog,
    cart_url: String,
    token_key: TokenKey,
}

impl<'a, C: CatalogProvider + ?Sized> Gate<'a, C> {
    /// Create the gate for one request
    ///
    /// `cart_url` is the host's cart page; clear-and-add links and redirects
    /// are built on it. `token_key` is the host's secret for link signing.
    #[must_use]
    pub fn new(
        catalog: &'a C,
        settings: Settings,
        cart_url: impl Into<String>,
        token_key: TokenKey,
    ) -> Self {
        let classifier = Classifier::new(catalog, settings.exclusive_category);
        Self {
            settings,
            classifier,
            notices: NoticeLog::new(),
            cart_url: cart_url.into(),
            token_key,
        }
    }

    /// Settings this gate was constructed with
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The request-scoped classifier
    #[inline]
    #[must_use]
    pub fn classifier(&self) -> &Classifier<'a, C> {
        &self.classifier
    }

    /// Notices accumulated so far this request
    #[inline]
    #[must_use]
    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    /// Hand accumulated notices to the host renderer
    #[must_use]
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    /// Current cart composition
    #[must_use]
    pub fn cart_mode(&self, items: &[LineItem]) -> CartMode {
        cart_mode(items, &self.classifier)
    }

    /// Validate an attempted add-to-cart mutation
    ///
    /// Invoked before the host commits the mutation. `items` is the cart as
    /// it stands, `attributes` the variation selections of the incoming
    /// request. Conflicts resolve per the advisory and resolve-mode
    /// settings; notices and decision logs are emitted as side effects on
    /// the gate.
    pub fn validate_add(
        &mut self,
        items: &[LineItem],
        product: ProductId,
        variation: VariationId,
        quantity: u32,
        attributes: &BTreeMap<String, String>,
    ) -> AddDecision {
        if !self.settings.category_configured() {
            return AddDecision::Allow;
        }

        let mode = self.cart_mode(items);
        let incoming = if self.classifier.is_exclusive(product, variation) {
            ItemClass::Exclusive
        } else {
            ItemClass::Regular
        };

        log::gated_debug(
            &self.settings,
            &format!(
                "add-to-cart check: cart_mode={mode:?} incoming={incoming:?} \
                 product={product} variation={variation}"
            ),
        );

        if admission(mode, incoming) == Admission::Allow {
            return AddDecision::Allow;
        }

        let message = mixing_message(incoming);

        if self.settings.advisory {
            self.notices
                .push_once(format!("Test mode: {message}"), Severity::Advisory);
            log::gated_warn(&self.settings, "advisory mode: allowed mixed add-to-cart");
            return AddDecision::AllowAdvised;
        }

        if self.settings.resolve_mode == ResolveMode::ClearAndAdd {
            let payload =
                ClearAddPayload::new(product, variation, quantity, attributes.clone());
            match build_url(&self.cart_url, &payload, &self.token_key) {
                Ok(url) => {
                    self.notices.push_once(
                        format!("{message} Clear the cart and add this item: {url}"),
                        Severity::Error,
                    );
                    log::gated_warn(
                        &self.settings,
                        "blocked mixed add-to-cart; offered clear-and-add link",
                    );
                    return AddDecision::DenyWithReset { url };
                }
                Err(err) => {
                    // degrade to a plain block rather than fail the request
                    log::always_warn(&format!("failed to build clear-and-add link: {err}"));
                }
            }
        }

        self.notices.push_once(message, Severity::Error);
        log::gated_warn(&self.settings, "blocked mixed add-to-cart in block mode");
        AddDecision::Deny
    }

    /// Whole-cart safety net
    ///
    /// Catches mixed carts arriving through paths that bypass add-time
    /// validation. Clear-and-add is not applicable here (there is no single
    /// incoming item), so a mixed cart is advised or blocked only.
    pub fn check_cart(&mut self, items: &[LineItem]) -> CartCheck {
        if !self.settings.category_configured() || items.is_empty() {
            return CartCheck::Pass;
        }

        if !self.cart_mode(items).is_mixed() {
            return CartCheck::Pass;
        }

        if self.settings.advisory {
            self.notices.push_once(
                format!("Test mode: {MIXED_CART_MESSAGE}"),
                Severity::Advisory,
            );
            log::gated_warn(
                &self.settings,
                "safety net detected mixed cart (advisory, not blocking)",
            );
            return CartCheck::Advised;
        }

        self.notices.push_once(MIXED_CART_MESSAGE, Severity::Error);
        log::gated_warn(&self.settings, "safety net blocked mixed cart");
        CartCheck::Blocked
    }

    /// Session-sync reconciliation pass
    ///
    /// See [`reconcile::sync_session`].
    pub fn sync_session<R>(
        &self,
        items: &[LineItem],
        packages: &[Package<R>],
        session: &mut dyn SessionStore,
    ) {
        reconcile::sync_session(&self.settings, &self.classifier, items, packages, session);
    }

    /// Offer-filtering reconciliation pass
    ///
    /// See [`reconcile::filter_rates`].
    #[must_use]
    pub fn filter_rates<R>(
        &self,
        items: &[LineItem],
        rates: IndexMap<MethodId, R>,
        session: &mut dyn SessionStore,
    ) -> IndexMap<MethodId, R> {
        reconcile::filter_rates(&self.settings, &self.classifier, items, rates, session)
    }

    /// Surface the missing-desired-rate advisory, once
    ///
    /// Pure read of the session flag; no mutation.
    pub fn missing_rate_notice(&mut self, items: &[LineItem], session: &dyn SessionStore) {
        if items.is_empty() || !self.settings.methods_configured() {
            return;
        }

        if session.missing_desired_rate() {
            self.notices.push_once(MISSING_RATE_MESSAGE, Severity::Error);
        }
    }

    /// Execute a verified clear-and-add redirect request
    ///
    /// Always returns a [`Redirect`]; the host must stop all further
    /// processing for the request once it receives one.
    pub fn handle_clear_add(
        &mut self,
        request: &ClearAddRequest,
        cart: &mut dyn CartOps,
    ) -> Redirect {
        redirect::handle_clear_add(
            request,
            self.classifier.catalog(),
            cart,
            &mut self.notices,
            &self.token_key,
            &self.cart_url,
        )
    }
}
