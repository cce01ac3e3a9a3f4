//! Navigation errors

use thiserror::Error;

use crate::context::ContextId;
use crate::style::Slot;

/// Errors raised by navigation context operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The child coordinator's context was not created under the presenting context
    #[error("Context {child} is not a child of context {parent}")]
    NotParented {
        /// Context asked to present
        parent: ContextId,
        /// Context of the child coordinator
        child: ContextId,
    },

    /// The slot already presents another coordinator
    #[error("The {slot} slot of context {context} is already presenting {current}")]
    SlotOccupied {
        /// Context that owns the slot
        context: ContextId,
        /// Occupied slot
        slot: Slot,
        /// Name of the coordinator in the slot
        current: String,
    },

    /// Replace was requested but nothing is presented
    #[error("Nothing is presented on context {0} to replace")]
    NothingToReplace(ContextId),

    /// A host can only be attached to a root context
    #[error("Context {0} is not a root context")]
    NotRoot(ContextId),

    /// The root context already reports to a host
    #[error("Context {0} already has a navigation host")]
    HostAlreadyAttached(ContextId),
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;
