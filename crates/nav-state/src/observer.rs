//! Registry observers
//!
//! Observers see every coordinator the registry learns about and every state
//! change in the context tree. Useful for analytics, deep-link bookkeeping and
//! memory diagnostics.

use nav_core::{ContextId, NavigationEvent};

/// Receives registry and navigation notifications
///
/// Called synchronously on the thread that mutated the tree, after all
/// navigation locks are released.
#[cfg_attr(test, mockall::automock)]
pub trait NavigationObserver: Send + Sync {
    /// A coordinator was registered
    fn on_registered(&self, context: ContextId, name: &str);

    /// A context presented or released a child
    fn on_event(&self, event: &NavigationEvent);
}
