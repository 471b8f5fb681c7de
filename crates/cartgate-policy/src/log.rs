//! Decision logging
//!
//! Decision traces are only emitted while advisory mode is on; a small set of
//! terminal events (clear-and-add success/failure) always logs. All events
//! share one target so hosts can route them to their own sink.

use cartgate_settings::Settings;

/// Target carried by every cartgate event
pub(crate) const TARGET: &str = "cartgate";

pub(crate) fn gated_debug(settings: &Settings, message: &str) {
    if settings.advisory {
        tracing::debug!(target: TARGET, "{message}");
    }
}

pub(crate) fn gated_info(settings: &Settings, message: &str) {
    if settings.advisory {
        tracing::info!(target: TARGET, "{message}");
    }
}

pub(crate) fn gated_warn(settings: &Settings, message: &str) {
    if settings.advisory {
        tracing::warn!(target: TARGET, "{message}");
    }
}

pub(crate) fn always_info(message: &str) {
    tracing::info!(target: TARGET, "{message}");
}

pub(crate) fn always_warn(message: &str) {
    tracing::warn!(target: TARGET, "{message}");
}
