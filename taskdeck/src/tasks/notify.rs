//! Single-slot transient notification channel.
//!
//! An explicit two-state machine (`hidden ⇄ visible`) with transitions
//! `push`, `dismiss`, and `expire_due`. A push always replaces the
//! current notice and resets the auto-dismiss deadline; a push while
//! hidden always shows. Time is injected so the machine is testable
//! without sleeping.

use std::time::{Duration, Instant};

/// Severity of an operation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation succeeded.
    Success,
    /// The operation failed (validation or remote).
    Error,
}

/// A user-facing message reporting one operation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Human-readable outcome description.
    pub message: String,
    /// Outcome severity.
    pub severity: Severity,
}

/// Visible notice plus its auto-dismiss deadline.
#[derive(Debug, Clone)]
struct ActiveNotice {
    notice: Notice,
    deadline: Instant,
}

/// The single-slot notification state machine.
#[derive(Debug)]
pub struct Notifier {
    slot: Option<ActiveNotice>,
    timeout: Duration,
}

impl Notifier {
    /// Creates a hidden notifier whose notices auto-dismiss after `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            slot: None,
            timeout,
        }
    }

    /// Shows a notice, replacing any currently visible one and resetting
    /// the auto-dismiss deadline.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.slot = Some(ActiveNotice {
            notice: Notice {
                message: message.into(),
                severity,
            },
            deadline: now + self.timeout,
        });
    }

    /// Clears the slot immediately (explicit close).
    pub fn dismiss(&mut self) {
        self.slot = None;
    }

    /// Clears the slot if its deadline has passed. Returns `true` when a
    /// notice was dismissed by this call.
    pub fn expire_due(&mut self, now: Instant) -> bool {
        match &self.slot {
            Some(active) if now >= active.deadline => {
                self.slot = None;
                true
            }
            _ => false,
        }
    }

    /// The currently visible notice, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Notice> {
        self.slot.as_ref().map(|a| &a.notice)
    }
}
