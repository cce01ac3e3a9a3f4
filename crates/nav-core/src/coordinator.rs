//! Coordinators and interactors
//!
//! A [`Coordinator`] binds one screen's content to exactly one
//! [`NavigationContext`]. Screen logic usually talks to an [`Interactor`]
//! instead, which only needs the context.

use std::fmt;
use std::sync::Arc;

use crate::context::NavigationContext;
use crate::error::Result;
use crate::style::PresentationStyle;
use crate::view::View;

/// Type-erased coordinator handle
pub type SharedCoordinator = Arc<dyn Coordinator>;

// =============================================================================
// Coordinator
// =============================================================================

/// Owner of a screen and its navigation context
pub trait Coordinator: Send + Sync + 'static {
    /// Get the context this coordinator presents from
    fn context(&self) -> &NavigationContext;

    /// Get the screen content
    ///
    /// Must return the same view for the lifetime of the coordinator.
    fn content_view(&self) -> View;

    /// Name used in logs, snapshots and paths
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Get the content bound to this coordinator's context
    fn view(&self) -> View {
        self.content_view().coordinated(self.context())
    }

    /// Build a child coordinator and present it
    fn transition<C, F>(&self, style: PresentationStyle, build: F) -> Result<Arc<C>>
    where
        Self: Sized,
        C: Coordinator,
        F: FnOnce(NavigationContext) -> C,
    {
        self.context().transition_to(style, build)
    }

    /// Hide this coordinator if it was presented as a sheet or fullscreen
    fn dismiss(&self) -> bool {
        self.context().dismiss()
    }

    /// Hide the child pushed from this coordinator
    fn pop(&self) -> bool {
        self.context().pop()
    }
}

/// Coordinator for screens that need nothing beyond content
pub struct ContentCoordinator {
    name: String,
    context: NavigationContext,
    content: View,
}

impl ContentCoordinator {
    /// Create a coordinator on an existing context
    pub fn new(name: impl Into<String>, context: NavigationContext, content: View) -> Self {
        Self {
            name: name.into(),
            context,
            content,
        }
    }

    /// Create a coordinator with its own root context
    pub fn root(name: impl Into<String>, content: View) -> Self {
        Self::new(name, NavigationContext::root(), content)
    }
}

impl fmt::Debug for ContentCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCoordinator")
            .field("name", &self.name)
            .field("context", &self.context.id())
            .finish()
    }
}

impl Coordinator for ContentCoordinator {
    fn context(&self) -> &NavigationContext {
        &self.context
    }

    fn content_view(&self) -> View {
        self.content.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// Interactor
// =============================================================================

/// Screen logic that drives navigation through a context
pub trait Interactor {
    /// Get the context of the screen this interactor serves
    fn context(&self) -> &NavigationContext;

    /// Build a child coordinator and present it
    fn transition<C, F>(&self, style: PresentationStyle, build: F) -> Result<Arc<C>>
    where
        C: Coordinator,
        F: FnOnce(NavigationContext) -> C,
    {
        self.context().transition_to(style, build)
    }

    /// Hide the screen if it was presented as a sheet or fullscreen
    fn dismiss(&self) -> bool {
        self.context().dismiss()
    }

    /// Hide the child pushed from the screen
    fn pop(&self) -> bool {
        self.context().pop()
    }

    /// Leave the screen the way it was entered
    fn back(&self) -> bool {
        self.context().back()
    }
}
