//! Navigator
//!
//! Navigation coordination that keeps presentation flow (push, sheet,
//! fullscreen, replace) independent of how screens are drawn.
//!
//! # Crates
//!
//! - [`nav_core`] - Presentation styles, views, navigation contexts and coordinators
//! - [`nav_state`] - Coordinator registry, configuration, observers and snapshots
//!
//! # Example
//!
//! ```rust
//! use navigator::{
//!     ContentCoordinator, Coordinator, CoordinatorRegistry, NavigatorConfig, PresentationStyle,
//!     View,
//! };
//!
//! let registry = CoordinatorRegistry::new(NavigatorConfig::default());
//! let root = registry
//!     .configure_with(ContentCoordinator::root("a", View::new("A")))
//!     .unwrap();
//!
//! let b = root
//!     .transition(PresentationStyle::Present { modal: true }, |context| {
//!         ContentCoordinator::new("b", context, View::new("B"))
//!     })
//!     .unwrap();
//! assert_eq!(registry.snapshot().unwrap().to_path(), "/a/sheet:b");
//!
//! b.dismiss();
//! assert_eq!(registry.snapshot().unwrap().to_path(), "/a");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use nav_core;
pub use nav_state;

pub use nav_core::{
    ConflictPolicy, ContentCoordinator, ContextId, Coordinator, Interactor, NavigationContext,
    NavigationError, NavigationEvent, NavigationHost, PresentationState, PresentationStyle,
    Presented, Renderable, SharedCoordinator, Slot, View, ViewNode,
};

pub use nav_state::{
    ChildSnapshot, ConfigError, CoordinatorRegistry, NavigationObserver, NavigatorConfig,
    NodeSnapshot, RegistryError, TreeSnapshot,
};
