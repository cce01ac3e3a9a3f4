//! Opaque renderable content
//!
//! Screen content is produced outside this crate. The core only wraps it:
//! a [`View`] is a small tree of nodes where the leaves are caller supplied
//! [`Renderable`] values and the inner nodes record how the core decorated them
//! (bound to a navigation context, or placed in a navigation container).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::context::NavigationContext;

// =============================================================================
// Renderable
// =============================================================================

/// Content that a renderer knows how to draw
///
/// Implemented for every `Send + Sync + 'static` value. Renderers recover the
/// concrete type through [`View::content`].
pub trait Renderable: Any + Send + Sync {
    /// Get the content as [`Any`] for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync> Renderable for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// View
// =============================================================================

/// A node of a view tree
pub enum ViewNode {
    /// Nothing to draw
    Empty,
    /// Caller supplied content
    Content(Arc<dyn Renderable>),
    /// Content observing a navigation context
    ///
    /// A renderer draws `content` and overlays whatever the context presents.
    Coordinated {
        /// Wrapped view
        content: View,
        /// Context whose slots decorate the content
        context: NavigationContext,
    },
    /// Content placed in its own navigation container
    NavigationContainer {
        /// Wrapped view
        content: View,
        /// The container ignores swipe-to-dismiss gestures
        interactive_dismiss_disabled: bool,
    },
}

/// Shared handle to a view tree
#[derive(Clone)]
pub struct View {
    node: Arc<ViewNode>,
}

impl View {
    /// Create a view that draws nothing
    pub fn empty() -> Self {
        Self::from_node(ViewNode::Empty)
    }

    /// Create a view from caller content
    pub fn new<R: Renderable>(content: R) -> Self {
        Self::from_node(ViewNode::Content(Arc::new(content)))
    }

    /// Create a view from already shared content
    pub fn from_shared(content: Arc<dyn Renderable>) -> Self {
        Self::from_node(ViewNode::Content(content))
    }

    fn from_node(node: ViewNode) -> Self {
        Self { node: Arc::new(node) }
    }

    /// Bind this view to a navigation context
    pub fn coordinated(self, context: &NavigationContext) -> Self {
        Self::from_node(ViewNode::Coordinated {
            content: self,
            context: context.clone(),
        })
    }

    /// Place this view in its own navigation container
    pub fn in_navigation(self, interactive_dismiss_disabled: bool) -> Self {
        Self::from_node(ViewNode::NavigationContainer {
            content: self,
            interactive_dismiss_disabled,
        })
    }

    /// Get the root node
    pub fn node(&self) -> &ViewNode {
        &self.node
    }

    /// Check if the view draws nothing
    pub fn is_empty(&self) -> bool {
        match self.node() {
            ViewNode::Empty => true,
            ViewNode::Content(_) => false,
            ViewNode::Coordinated { content, .. }
            | ViewNode::NavigationContainer { content, .. } => content.is_empty(),
        }
    }

    /// Strip an outer navigation container, if any
    pub fn without_navigation(&self) -> &View {
        match self.node() {
            ViewNode::NavigationContainer { content, .. } => content,
            _ => self,
        }
    }

    /// Check if the view sits in a navigation container
    pub fn is_in_navigation(&self) -> bool {
        matches!(self.node(), ViewNode::NavigationContainer { .. })
    }

    /// Check if the outer container blocks interactive dismissal
    pub fn interactive_dismiss_disabled(&self) -> bool {
        matches!(
            self.node(),
            ViewNode::NavigationContainer {
                interactive_dismiss_disabled: true,
                ..
            }
        )
    }

    /// Get the navigation context this view observes
    pub fn context(&self) -> Option<&NavigationContext> {
        match self.node() {
            ViewNode::Coordinated { context, .. } => Some(context),
            ViewNode::NavigationContainer { content, .. } => content.context(),
            ViewNode::Empty | ViewNode::Content(_) => None,
        }
    }

    /// Get the caller content if it has type `T`
    pub fn content<T: Any>(&self) -> Option<&T> {
        match self.node() {
            ViewNode::Content(content) => {
                let content: &dyn Renderable = content.as_ref();
                content.as_any().downcast_ref::<T>()
            }
            ViewNode::Coordinated { content, .. }
            | ViewNode::NavigationContainer { content, .. } => content.content::<T>(),
            ViewNode::Empty => None,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::empty()
    }
}

/// Views compare by identity of their content and contexts
impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.node, &other.node) {
            return true;
        }
        match (self.node(), other.node()) {
            (ViewNode::Empty, ViewNode::Empty) => true,
            (ViewNode::Content(a), ViewNode::Content(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
            }
            (
                ViewNode::Coordinated {
                    content: a,
                    context: ca,
                },
                ViewNode::Coordinated {
                    content: b,
                    context: cb,
                },
            ) => ca == cb && a == b,
            (
                ViewNode::NavigationContainer {
                    content: a,
                    interactive_dismiss_disabled: da,
                },
                ViewNode::NavigationContainer {
                    content: b,
                    interactive_dismiss_disabled: db,
                },
            ) => da == db && a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            ViewNode::Empty => f.write_str("Empty"),
            ViewNode::Content(_) => f.write_str("Content"),
            ViewNode::Coordinated { content, context } => f
                .debug_struct("Coordinated")
                .field("context", &context.id())
                .field("content", content)
                .finish(),
            ViewNode::NavigationContainer {
                content,
                interactive_dismiss_disabled,
            } => f
                .debug_struct("NavigationContainer")
                .field("interactive_dismiss_disabled", interactive_dismiss_disabled)
                .field("content", content)
                .finish(),
        }
    }
}
