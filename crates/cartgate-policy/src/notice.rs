//! User-facing notices
//!
//! An append-only, per-request list rendered by the host UI. Emission is
//! idempotent: the same (message, severity) pair is recorded at most once per
//! rendering cycle.

use serde::{Deserialize, Serialize};

/// Notice severity, mapped onto the host's notice types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocking or failure message
    Error,
    /// Confirmation of a completed action
    Success,
    /// Informational, non-blocking message
    Advisory,
}

/// One user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Message text as rendered to the shopper
    pub message: String,
    /// Rendering severity
    pub severity: Severity,
}

/// Per-request notice accumulator with duplicate suppression
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    /// Create an empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notice unless an identical one is already present
    ///
    /// Returns true when the notice was actually appended.
    pub fn push_once(&mut self, message: impl Into<String>, severity: Severity) -> bool {
        let message = message.into();
        if self.has(&message, severity) {
            return false;
        }
        self.notices.push(Notice { message, severity });
        true
    }

    /// True when an identical notice has already been recorded
    #[must_use]
    pub fn has(&self, message: &str, severity: Severity) -> bool {
        self.notices
            .iter()
            .any(|n| n.severity == severity && n.message == message)
    }

    /// Recorded notices, in emission order
    #[must_use]
    pub fn as_slice(&self) -> &[Notice] {
        &self.notices
    }

    /// Number of recorded notices
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// True when nothing has been recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Hand the accumulated notices to the host renderer
    #[must_use]
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
