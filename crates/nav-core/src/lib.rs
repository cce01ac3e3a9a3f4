//! Navigation state machine for Navigator
//!
//! This crate decouples what screen logic does from how screens are rendered.
//! Screens are owned by coordinators, each coordinator owns a navigation
//! context, and contexts present child coordinators in one of three slots.
//!
//! # Modules
//!
//! - [`style`] - Presentation styles and slots
//! - [`view`] - Opaque renderable content and view trees
//! - [`context`] - Navigation contexts and the transition algorithm
//! - [`coordinator`] - Coordinator and interactor traits
//! - [`host`] - The seam to whatever owns a context tree
//! - [`error`] - Navigation errors
//!
//! # Example
//!
//! ```rust
//! use nav_core::{ContentCoordinator, Coordinator, PresentationStyle, View};
//!
//! let home = ContentCoordinator::root("home", View::new("home screen"));
//! let editor = home
//!     .transition(PresentationStyle::Present { modal: true }, |context| {
//!         ContentCoordinator::new("editor", context, View::new("editor screen"))
//!     })
//!     .unwrap();
//! assert!(home.context().sheet_visible());
//!
//! editor.dismiss();
//! assert!(!home.context().sheet_visible());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod style;
pub mod view;

pub use context::{ContextId, NavigationContext, PresentationState, Presented};
pub use coordinator::{ContentCoordinator, Coordinator, Interactor, SharedCoordinator};
pub use error::{NavigationError, Result};
pub use host::{ConflictPolicy, NavigationEvent, NavigationHost};
pub use style::{PresentationStyle, Slot};
pub use view::{Renderable, View, ViewNode};
