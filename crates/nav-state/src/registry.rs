//! Coordinator registry
//!
//! The registry is the entry point of a navigation tree. It owns the root
//! coordinator and keeps a record of every coordinator created by a transition
//! anywhere below it. The record holds weak handles only: a coordinator stays
//! alive exactly as long as a context slot presents it, and disappears from
//! the registry once it is released.

use nav_core::{
    ConflictPolicy, ContextId, Coordinator, NavigationError, NavigationEvent, NavigationHost,
    SharedCoordinator, View,
};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use thiserror::Error;

use crate::config::NavigatorConfig;
use crate::observer::NavigationObserver;
use crate::snapshot::TreeSnapshot;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// `configure` was called on a registry that already has a root
    #[error("Registry already configured with root {0}")]
    AlreadyConfigured(String),

    /// The registry has no root coordinator
    #[error("Registry has no root coordinator")]
    NotConfigured,

    /// Navigation error
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Weak record of a registered coordinator
struct RegistryEntry {
    context: ContextId,
    coordinator: Weak<dyn Coordinator>,
}

impl RegistryEntry {
    fn is_live(&self) -> bool {
        self.coordinator.strong_count() > 0
    }
}

#[derive(Default)]
struct RegistryState {
    root: Option<SharedCoordinator>,
    entries: Vec<RegistryEntry>,
}

struct RegistryShared {
    config: NavigatorConfig,
    state: RwLock<RegistryState>,
    observers: RwLock<Vec<Arc<dyn NavigationObserver>>>,
}

impl RegistryShared {
    fn observers(&self) -> Vec<Arc<dyn NavigationObserver>> {
        self.observers.read().clone()
    }

    fn add(&self, coordinator: &SharedCoordinator) {
        let context = coordinator.context().id();
        let added = {
            let mut state = self.state.write();
            state.entries.retain(RegistryEntry::is_live);
            let known = state.entries.iter().any(|e| e.context == context)
                || state
                    .root
                    .as_ref()
                    .is_some_and(|root| root.context().id() == context);
            if !known {
                state.entries.push(RegistryEntry {
                    context,
                    coordinator: Arc::downgrade(coordinator),
                });
            }
            !known
        };

        if added {
            let name = coordinator.name();
            tracing::debug!("Registered coordinator {} ({})", name, context);
            for observer in self.observers() {
                observer.on_registered(context, name);
            }
        }
    }
}

impl NavigationHost for RegistryShared {
    fn register(&self, coordinator: &SharedCoordinator) {
        self.add(coordinator);
    }

    fn conflict_policy(&self) -> ConflictPolicy {
        self.config.conflict_policy
    }

    fn on_event(&self, event: &NavigationEvent) {
        for observer in self.observers() {
            observer.on_event(event);
        }
    }
}

/// Registry of live coordinators, rooted at one entry coordinator
///
/// Cloning yields another handle to the same registry. Independent registries
/// can coexist, each with its own tree.
///
/// # Example
///
/// ```rust
/// use nav_core::{ContentCoordinator, Coordinator, PresentationStyle, View};
/// use nav_state::{CoordinatorRegistry, NavigatorConfig};
///
/// let registry = CoordinatorRegistry::new(NavigatorConfig::default());
/// let home = registry
///     .configure_with(ContentCoordinator::root("home", View::new("home")))
///     .unwrap();
///
/// home.transition(PresentationStyle::Push, |context| {
///     ContentCoordinator::new("detail", context, View::new("detail"))
/// })
/// .unwrap();
///
/// assert_eq!(registry.live_count(), 2);
/// assert_eq!(registry.snapshot().unwrap().to_path(), "/home/push:detail");
/// ```
#[derive(Clone)]
pub struct CoordinatorRegistry {
    shared: Arc<RegistryShared>,
}

impl CoordinatorRegistry {
    /// Create an empty registry
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            shared: Arc::new(RegistryShared {
                config,
                state: RwLock::new(RegistryState::default()),
                observers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &NavigatorConfig {
        &self.shared.config
    }

    /// Install the root coordinator
    ///
    /// Can only succeed once. A second call leaves the current root untouched.
    /// The root's context must not have a parent.
    pub fn configure(&self, root: SharedCoordinator) -> Result<()> {
        let mut state = self.shared.state.write();
        if let Some(existing) = &state.root {
            tracing::error!(
                "Registry already configured with {}, ignoring {}",
                existing.name(),
                root.name()
            );
            return Err(RegistryError::AlreadyConfigured(existing.name().to_string()));
        }

        let host = Arc::downgrade(&self.shared);
        let host: Weak<dyn NavigationHost> = host;
        root.context().attach_host(host)?;

        tracing::debug!(
            "Registry configured with root {} ({})",
            root.name(),
            root.context().id()
        );
        state.root = Some(root);
        Ok(())
    }

    /// Install a concrete root coordinator and get it back
    pub fn configure_with<C: Coordinator>(&self, root: C) -> Result<Arc<C>> {
        let root = Arc::new(root);
        let shared: SharedCoordinator = root.clone();
        self.configure(shared)?;
        Ok(root)
    }

    /// Check if a root coordinator is installed
    pub fn is_configured(&self) -> bool {
        self.shared.state.read().root.is_some()
    }

    /// Get the root coordinator
    pub fn root(&self) -> Option<SharedCoordinator> {
        self.shared.state.read().root.clone()
    }

    /// Record a coordinator
    ///
    /// Transitions call this through the tree's host, so it only needs to be
    /// called for coordinators created some other way.
    pub fn add(&self, coordinator: &SharedCoordinator) {
        self.shared.add(coordinator);
    }

    /// Get the view for a single top-level render call
    pub fn current_root(&self) -> Result<View> {
        let root = self.root().ok_or(RegistryError::NotConfigured)?;
        let view = root.view();
        if self.shared.config.wrap_root_in_navigation {
            Ok(view.in_navigation(false))
        } else {
            Ok(view)
        }
    }

    /// Count the root plus every registered coordinator that is still alive
    ///
    /// A coordinator released from the tree but still held elsewhere counts
    /// until that last handle is dropped. Coordinators presented from such a
    /// detached subtree are never registered.
    pub fn live_count(&self) -> usize {
        let state = self.shared.state.read();
        let registered = state.entries.iter().filter(|e| e.is_live()).count();
        registered + usize::from(state.root.is_some())
    }

    /// Get the root and every live registered coordinator, in registration order
    pub fn live_coordinators(&self) -> Vec<SharedCoordinator> {
        let state = self.shared.state.read();
        state
            .root
            .iter()
            .cloned()
            .chain(state.entries.iter().filter_map(|e| e.coordinator.upgrade()))
            .collect()
    }

    /// Find a live coordinator by name
    pub fn find(&self, name: &str) -> Option<SharedCoordinator> {
        self.live_coordinators()
            .into_iter()
            .find(|c| c.name() == name)
    }

    /// Drop records of released coordinators, returning how many were removed
    pub fn prune(&self) -> usize {
        let mut state = self.shared.state.write();
        let before = state.entries.len();
        state.entries.retain(RegistryEntry::is_live);
        let removed = before - state.entries.len();
        if removed > 0 {
            tracing::debug!("Pruned {} released coordinators", removed);
        }
        removed
    }

    /// Remove the root and forget every record
    ///
    /// Returns the old root. Dropping it releases the whole tree.
    pub fn teardown(&self) -> Option<SharedCoordinator> {
        let root = {
            let mut state = self.shared.state.write();
            state.entries.clear();
            state.root.take()
        };
        if let Some(root) = &root {
            root.context().detach_host();
            tracing::debug!("Registry torn down, released root {}", root.name());
        }
        root
    }

    /// Add an observer
    pub fn add_observer(&self, observer: Arc<dyn NavigationObserver>) {
        self.shared.observers.write().push(observer);
    }

    /// Capture the tree of currently presented coordinators
    pub fn snapshot(&self) -> Result<TreeSnapshot> {
        let root = self.root().ok_or(RegistryError::NotConfigured)?;
        Ok(TreeSnapshot::capture(&*root))
    }
}

impl Default for CoordinatorRegistry {
    fn default() -> Self {
        Self::new(NavigatorConfig::default())
    }
}
