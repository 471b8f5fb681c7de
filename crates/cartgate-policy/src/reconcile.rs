//! Fulfillment reconciliation
//!
//! Two independent passes over the host's shipment packages and their rate
//! offers:
//!
//! - **Session sync**: force the desired method as the chosen selection for
//!   each package where it is offered, flag it missing where it is not.
//! - **Offer filtering**: remove the competing configured method from an
//!   offer set when the desired one is present and hiding is enabled.
//!
//! Both passes are pure transformations over the provided structures; the
//! only state they touch is the session's chosen selection and
//! missing-desired-rate flag, and advisory mode reduces them to logging.

use crate::log;
use crate::method::desired_method;
use crate::session::SessionStore;
use cartgate_core::{cart_mode, CatalogProvider, Classifier, LineItem, MethodId};
use cartgate_settings::Settings;
use indexmap::IndexMap;

/// One shipment package and the rates offered for it
///
/// Generic over the host's rate payload: reconciliation only reads offer-set
/// keys, so whatever the host attaches to a rate flows through untouched.
#[derive(Debug, Clone, Default)]
pub struct Package<R> {
    /// Offered rates, keyed by method id, in the host's offer order
    pub rates: IndexMap<MethodId, R>,
}

impl<R> Package<R> {
    /// Create a package from its offered rates
    #[inline]
    #[must_use]
    pub fn new(rates: IndexMap<MethodId, R>) -> Self {
        Self { rates }
    }
}

/// Session-sync pass: align each package's chosen selection with the
/// desired method
///
/// Clears the missing-rate flag at the start of the pass; it is only ever set
/// true afterwards. Forcing skips packages already on the desired method,
/// skips entirely under advisory mode or when auto-select is disabled, and
/// never touches a package whose non-empty offer set lacks the desired rate
/// (those set the flag instead). When the host enumerates no packages, a
/// single implicit package at index 0 is assumed.
pub fn sync_session<C, R>(
    settings: &Settings,
    classifier: &Classifier<'_, C>,
    items: &[LineItem],
    packages: &[Package<R>],
    session: &mut dyn SessionStore,
) where
    C: CatalogProvider + ?Sized,
{
    if items.is_empty() {
        return;
    }

    if !settings.methods_configured() {
        log::gated_warn(
            settings,
            "fulfillment method ids are not configured; enforcement skipped",
        );
        return;
    }

    let mode = cart_mode(items, classifier);
    let Some(desired) = desired_method(mode, settings) else {
        return;
    };

    log::gated_info(
        settings,
        &format!("sync fulfillment method: cart_mode={mode:?} desired={desired}"),
    );

    session.set_missing_desired_rate(false);

    if settings.advisory {
        log::gated_info(settings, "advisory mode: skipped forcing chosen methods");
        return;
    }

    if !settings.autoselect {
        return;
    }

    if packages.is_empty() {
        if session.chosen_method(0).as_ref() != Some(&desired) {
            session.set_chosen_method(0, desired.clone());
            log::gated_info(
                settings,
                &format!("forced chosen method for package 0 to {desired}"),
            );
        }
        return;
    }

    for (index, package) in packages.iter().enumerate() {
        if !package.rates.is_empty() && !package.rates.contains_key(&desired) {
            session.set_missing_desired_rate(true);
            log::gated_warn(
                settings,
                &format!("desired method {desired} missing in package {index} rates; skipped forcing"),
            );
            continue;
        }

        if session.chosen_method(index).as_ref() != Some(&desired) {
            session.set_chosen_method(index, desired.clone());
            log::gated_info(
                settings,
                &format!("forced chosen method for package {index} to {desired}"),
            );
        }
    }
}

/// Offer-filtering pass: hide the competing method where the desired one
/// is offered
///
/// Returns the offer set unchanged whenever there is nothing to enforce; the
/// order of surviving offers is preserved. Hiding only applies when the
/// desired rate is actually present; an absent desired rate sets the
/// missing flag and leaves the set alone.
#[must_use]
pub fn filter_rates<C, R>(
    settings: &Settings,
    classifier: &Classifier<'_, C>,
    items: &[LineItem],
    mut rates: IndexMap<MethodId, R>,
    session: &mut dyn SessionStore,
) -> IndexMap<MethodId, R>
where
    C: CatalogProvider + ?Sized,
{
    if items.is_empty() || !settings.methods_configured() {
        return rates;
    }

    let mode = cart_mode(items, classifier);
    let Some(desired) = desired_method(mode, settings) else {
        return rates;
    };

    if !rates.contains_key(&desired) {
        session.set_missing_desired_rate(true);
        let offered: Vec<&str> = rates.keys().map(MethodId::as_str).collect();
        log::gated_warn(
            settings,
            &format!(
                "desired method {desired} missing in package rates: {}",
                offered.join(", ")
            ),
        );
        return rates;
    }

    if !settings.hide_other {
        return rates;
    }

    let Some(wrong) = settings.wrong_method(&desired) else {
        return rates;
    };

    if !rates.contains_key(&wrong) {
        return rates;
    }

    if settings.advisory {
        log::gated_info(
            settings,
            &format!("advisory mode: would hide rate {wrong} while desired method is {desired}"),
        );
        return rates;
    }

    rates.shift_remove(&wrong);
    log::gated_info(
        settings,
        &format!("hid rate {wrong} while desired method is {desired}"),
    );

    rates
}
