//! The seam between a context tree and whatever owns it
//!
//! A root [`NavigationContext`](crate::NavigationContext) may report to a
//! [`NavigationHost`]. Every context below that root reaches the same host by
//! walking its parent chain, so coordinators created anywhere in the tree are
//! registered with it and every state change is reported to it.

use serde::{Deserialize, Serialize};

use crate::context::ContextId;
use crate::coordinator::SharedCoordinator;
use crate::style::{PresentationStyle, Slot};

/// What to do when a transition targets a slot that is already presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Fail the transition with `SlotOccupied`
    #[default]
    Reject,
    /// Release the current child and present the new one
    Replace,
}

/// State change reported by a navigation context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    /// A child was presented
    Transitioned {
        /// Presenting context
        context: ContextId,
        /// Context of the presented child
        child: ContextId,
        /// Slot that now holds the child
        slot: Slot,
        /// Requested style
        style: PresentationStyle,
        /// Name of the presented coordinator
        coordinator: String,
    },
    /// A slot was cleared by dismiss, pop or the render boundary
    Cleared {
        /// Context that owns the slot
        context: ContextId,
        /// Cleared slot
        slot: Slot,
        /// Name of the released coordinator
        coordinator: String,
    },
}

impl NavigationEvent {
    /// Get the context whose state changed
    pub fn context(&self) -> ContextId {
        match self {
            NavigationEvent::Transitioned { context, .. }
            | NavigationEvent::Cleared { context, .. } => *context,
        }
    }

    /// Get the slot that changed
    pub fn slot(&self) -> Slot {
        match self {
            NavigationEvent::Transitioned { slot, .. } | NavigationEvent::Cleared { slot, .. } => {
                *slot
            }
        }
    }
}

/// Owner of a context tree
pub trait NavigationHost: Send + Sync {
    /// Record a coordinator created by a transition anywhere in the tree
    fn register(&self, coordinator: &SharedCoordinator);

    /// Policy for transitions into an occupied slot
    fn conflict_policy(&self) -> ConflictPolicy {
        ConflictPolicy::default()
    }

    /// Observe a state change
    fn on_event(&self, _event: &NavigationEvent) {}
}
