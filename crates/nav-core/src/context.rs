//! Navigation contexts
//!
//! A [`NavigationContext`] holds the presentation state of one coordinator:
//! three slots (push, sheet, fullscreen) that either present a child coordinator
//! or are empty. Contexts form a tree. Each one keeps a weak reference to the
//! context it was created under and strong references to the children it
//! presents, so clearing a slot releases the child and everything below it.
//!
//! # State transitions
//!
//! | operation | target | effect |
//! |---|---|---|
//! | `transition(Push, c)` | self | push slot presents `c` |
//! | `transition(Present { modal }, c)` | self | sheet slot presents `c` in a navigation container |
//! | `transition(FullscreenModal, c)` | self | fullscreen slot presents `c` in a navigation container |
//! | `transition(Replace, c)` | self | topmost occupied slot presents `c` instead |
//! | `dismiss()` | parent | sheet and fullscreen slots cleared |
//! | `pop()` | self | push slot cleared |

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use uuid::Uuid;

use crate::coordinator::{Coordinator, SharedCoordinator};
use crate::error::{NavigationError, Result};
use crate::host::{ConflictPolicy, NavigationEvent, NavigationHost};
use crate::style::{PresentationStyle, Slot};
use crate::view::View;

// =============================================================================
// Identifiers and observable state
// =============================================================================

/// Unique identifier of a navigation context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(Uuid);

impl ContextId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the visibility flags of a context
///
/// Published on every change through [`NavigationContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresentationState {
    /// Push slot presents a child
    pub push_visible: bool,
    /// Sheet slot presents a child
    pub sheet_visible: bool,
    /// Fullscreen slot presents a child
    pub fullscreen_visible: bool,
    /// Number of changes applied to the context
    pub revision: u64,
}

impl PresentationState {
    /// Check if a slot is visible
    pub fn is_visible(&self, slot: Slot) -> bool {
        match slot {
            Slot::Push => self.push_visible,
            Slot::Sheet => self.sheet_visible,
            Slot::Fullscreen => self.fullscreen_visible,
        }
    }

    /// Get the topmost visible slot
    pub fn topmost(&self) -> Option<Slot> {
        Slot::all().into_iter().find(|slot| self.is_visible(*slot))
    }

    /// Check if nothing is presented
    pub fn is_idle(&self) -> bool {
        self.topmost().is_none()
    }
}

/// A child held by one of the slots
#[derive(Clone)]
pub struct Presented {
    coordinator: SharedCoordinator,
    view: View,
}

impl Presented {
    /// Get the presented coordinator
    pub fn coordinator(&self) -> &SharedCoordinator {
        &self.coordinator
    }

    /// Get the view a renderer should draw for this slot
    pub fn view(&self) -> &View {
        &self.view
    }
}

impl fmt::Debug for Presented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presented")
            .field("coordinator", &self.coordinator.name())
            .field("context", &self.coordinator.context().id())
            .finish()
    }
}

#[derive(Default)]
struct Slots {
    push: Option<Presented>,
    sheet: Option<Presented>,
    fullscreen: Option<Presented>,
    revision: u64,
}

impl Slots {
    fn get(&self, slot: Slot) -> Option<&Presented> {
        match slot {
            Slot::Push => self.push.as_ref(),
            Slot::Sheet => self.sheet.as_ref(),
            Slot::Fullscreen => self.fullscreen.as_ref(),
        }
    }

    fn get_mut(&mut self, slot: Slot) -> &mut Option<Presented> {
        match slot {
            Slot::Push => &mut self.push,
            Slot::Sheet => &mut self.sheet,
            Slot::Fullscreen => &mut self.fullscreen,
        }
    }

    fn state(&self) -> PresentationState {
        PresentationState {
            push_visible: self.push.is_some(),
            sheet_visible: self.sheet.is_some(),
            fullscreen_visible: self.fullscreen.is_some(),
            revision: self.revision,
        }
    }
}

// =============================================================================
// Navigation Context
// =============================================================================

struct ContextInner {
    id: ContextId,
    parent: Option<Weak<ContextInner>>,
    host: RwLock<Option<Weak<dyn NavigationHost>>>,
    slots: RwLock<Slots>,
    changes: watch::Sender<PresentationState>,
}

/// Presentation state of one coordinator
///
/// Cloning yields another handle to the same context.
#[derive(Clone)]
pub struct NavigationContext {
    inner: Arc<ContextInner>,
}

impl NavigationContext {
    /// Create a context without a parent
    pub fn root() -> Self {
        Self::build(None)
    }

    /// Create a context under `parent`
    ///
    /// The parent is never kept alive by the child.
    pub fn child_of(parent: &NavigationContext) -> Self {
        Self::build(Some(Arc::downgrade(&parent.inner)))
    }

    fn build(parent: Option<Weak<ContextInner>>) -> Self {
        let (changes, _) = watch::channel(PresentationState::default());
        Self {
            inner: Arc::new(ContextInner {
                id: ContextId::new(),
                parent,
                host: RwLock::new(None),
                slots: RwLock::new(Slots::default()),
                changes,
            }),
        }
    }

    /// Get the context identifier
    pub fn id(&self) -> ContextId {
        self.inner.id
    }

    /// Get the parent context, if it was created under one that is still alive
    pub fn parent(&self) -> Option<NavigationContext> {
        let inner = self.inner.parent.as_ref()?.upgrade()?;
        Some(NavigationContext { inner })
    }

    /// Check if the context was created without a parent
    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Check if the context was created under `parent`
    pub fn is_child_of(&self, parent: &NavigationContext) -> bool {
        self.inner
            .parent
            .as_ref()
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(&parent.inner)))
    }

    // -------------------------------------------------------------------------
    // Host
    // -------------------------------------------------------------------------

    /// Make this root context report to `host`
    pub fn attach_host(&self, host: Weak<dyn NavigationHost>) -> Result<()> {
        if !self.is_root() {
            return Err(NavigationError::NotRoot(self.id()));
        }
        let mut current = self.inner.host.write();
        if current.as_ref().is_some_and(|h| h.strong_count() > 0) {
            return Err(NavigationError::HostAlreadyAttached(self.id()));
        }
        *current = Some(host);
        Ok(())
    }

    /// Stop reporting to the attached host
    pub fn detach_host(&self) {
        self.inner.host.write().take();
    }

    /// Get the host of the tree this context belongs to
    pub fn host(&self) -> Option<Arc<dyn NavigationHost>> {
        let mut current = self.clone();
        loop {
            if let Some(host) = current.inner.host.read().as_ref().and_then(Weak::upgrade) {
                return Some(host);
            }
            current = current.parent()?;
        }
    }

    /// Check if this context is reachable from its root through presented slots
    ///
    /// A context stops being attached once the slot presenting it (or any slot
    /// above it) is cleared, even while a handle to it is still held elsewhere.
    pub fn is_attached(&self) -> bool {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            let presented = parent
                .children()
                .iter()
                .any(|(_, p)| p.coordinator.context() == &current);
            if !presented {
                return false;
            }
            current = parent;
        }
        current.is_root()
    }

    /// Get the host only while this context is part of the presented tree
    fn attached_host(&self) -> Option<Arc<dyn NavigationHost>> {
        let host = self.host()?;
        if self.is_attached() {
            Some(host)
        } else {
            tracing::debug!("Context {} is detached from its tree", self.id());
            None
        }
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Get the current visibility flags
    pub fn state(&self) -> PresentationState {
        self.inner.slots.read().state()
    }

    /// Subscribe to visibility changes
    ///
    /// Copy the state out of a borrow before mutating any context. Every
    /// mutation publishes to this channel, and publishing waits for
    /// outstanding borrows to end.
    pub fn subscribe(&self) -> watch::Receiver<PresentationState> {
        self.inner.changes.subscribe()
    }

    /// Check if a slot presents a child
    pub fn is_visible(&self, slot: Slot) -> bool {
        self.inner.slots.read().get(slot).is_some()
    }

    /// Get the child presented in a slot
    pub fn presented(&self, slot: Slot) -> Option<Presented> {
        self.inner.slots.read().get(slot).cloned()
    }

    /// Get the view presented in a slot
    ///
    /// `None` whenever the slot is not visible.
    pub fn content(&self, slot: Slot) -> Option<View> {
        self.presented(slot).map(|p| p.view)
    }

    /// Get all presented children, topmost first
    pub fn children(&self) -> Vec<(Slot, Presented)> {
        let slots = self.inner.slots.read();
        Slot::all()
            .into_iter()
            .filter_map(|slot| slots.get(slot).map(|p| (slot, p.clone())))
            .collect()
    }

    /// Check if the push slot is visible
    pub fn push_visible(&self) -> bool {
        self.is_visible(Slot::Push)
    }

    /// Get the pushed view
    pub fn push_content(&self) -> Option<View> {
        self.content(Slot::Push)
    }

    /// Check if the sheet slot is visible
    pub fn sheet_visible(&self) -> bool {
        self.is_visible(Slot::Sheet)
    }

    /// Get the sheet view
    pub fn sheet_content(&self) -> Option<View> {
        self.content(Slot::Sheet)
    }

    /// Check if the fullscreen slot is visible
    pub fn fullscreen_visible(&self) -> bool {
        self.is_visible(Slot::Fullscreen)
    }

    /// Get the fullscreen view
    pub fn fullscreen_content(&self) -> Option<View> {
        self.content(Slot::Fullscreen)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Present `child` from this context
    ///
    /// The child's context must have been created under this one.
    pub fn transition(&self, style: PresentationStyle, child: SharedCoordinator) -> Result<()> {
        let child_context = child.context().clone();
        if !child_context.is_child_of(self) {
            return Err(NavigationError::NotParented {
                parent: self.id(),
                child: child_context.id(),
            });
        }

        let host = self.attached_host();
        let policy = host
            .as_ref()
            .map(|h| h.conflict_policy())
            .unwrap_or_default();
        let name = child.name().to_string();
        let view = child.view();

        let (slot, displaced, state) = {
            let mut slots = self.inner.slots.write();

            let slot = match style.slot() {
                Some(slot) => slot,
                None => slots
                    .state()
                    .topmost()
                    .ok_or(NavigationError::NothingToReplace(self.id()))?,
            };

            let current = slots
                .get(slot)
                .map(|p| (p.coordinator.name().to_string(), p.view.interactive_dismiss_disabled()));

            let modal = match (style, &current) {
                (PresentationStyle::Present { modal }, _) => modal,
                (PresentationStyle::Replace, Some((_, modal))) => *modal,
                _ => false,
            };

            if let (Some((current, _)), true) = (&current, style.slot().is_some()) {
                match policy {
                    ConflictPolicy::Reject => {
                        return Err(NavigationError::SlotOccupied {
                            context: self.id(),
                            slot,
                            current: current.clone(),
                        });
                    }
                    ConflictPolicy::Replace => {
                        tracing::warn!(
                            "Context {} {} slot overwritten: {} replaces {}",
                            self.id(),
                            slot,
                            name,
                            current
                        );
                    }
                }
            }

            let view = if slot.wraps_in_navigation() {
                view.in_navigation(modal)
            } else {
                view
            };

            let displaced = slots.get_mut(slot).replace(Presented {
                coordinator: Arc::clone(&child),
                view,
            });
            slots.revision += 1;
            (slot, displaced, slots.state())
        };
        self.inner.changes.send_replace(state);

        tracing::debug!(
            "Context {} presented {} via {} in {} slot",
            self.id(),
            name,
            style,
            slot
        );

        if let Some(old) = &displaced {
            let old_name = old.coordinator.name().to_string();
            tracing::debug!("Context {} released {} from {} slot", self.id(), old_name, slot);
            if let Some(host) = &host {
                host.on_event(&NavigationEvent::Cleared {
                    context: self.id(),
                    slot,
                    coordinator: old_name,
                });
            }
        }

        match &host {
            Some(host) => {
                host.register(&child);
                host.on_event(&NavigationEvent::Transitioned {
                    context: self.id(),
                    child: child_context.id(),
                    slot,
                    style,
                    coordinator: name,
                });
            }
            None => tracing::debug!(
                "Context {} is not attached to a host, {} not registered",
                self.id(),
                name
            ),
        }

        drop(displaced);
        Ok(())
    }

    /// Build a child coordinator under this context and present it
    ///
    /// `build` receives a fresh context parented to this one.
    pub fn transition_to<C, F>(&self, style: PresentationStyle, build: F) -> Result<Arc<C>>
    where
        C: Coordinator,
        F: FnOnce(NavigationContext) -> C,
    {
        let child = Arc::new(build(NavigationContext::child_of(self)));
        let shared: SharedCoordinator = child.clone();
        self.transition(style, shared)?;
        Ok(child)
    }

    /// Hide the sheet or fullscreen child this context was presented as
    ///
    /// Clears the parent's sheet and fullscreen slots. Returns `false` if
    /// nothing changed, including when called on a root context.
    pub fn dismiss(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.clear(&[Slot::Sheet, Slot::Fullscreen]),
            None => {
                tracing::debug!("Dismiss on context {} without parent ignored", self.id());
                false
            }
        }
    }

    /// Hide the child pushed from this context
    pub fn pop(&self) -> bool {
        self.clear(&[Slot::Push])
    }

    /// Leave this context the way it was entered
    ///
    /// Pops the parent if this context is its pushed child, and dismisses otherwise.
    pub fn back(&self) -> bool {
        if let Some(parent) = self.parent() {
            let pushed_here = parent
                .presented(Slot::Push)
                .is_some_and(|p| p.coordinator.context() == self);
            if pushed_here {
                return parent.pop();
            }
        }
        self.dismiss()
    }

    /// Clear a single slot
    ///
    /// Used by the render boundary when a user gesture hides a presentation.
    pub fn clear_slot(&self, slot: Slot) -> bool {
        self.clear(&[slot])
    }

    /// Clear every slot of this context
    pub fn reset(&self) -> bool {
        self.clear(&Slot::all())
    }

    fn clear(&self, targets: &[Slot]) -> bool {
        let (released, state) = {
            let mut slots = self.inner.slots.write();
            let released: Vec<(Slot, Presented)> = targets
                .iter()
                .filter_map(|&slot| slots.get_mut(slot).take().map(|p| (slot, p)))
                .collect();
            if released.is_empty() {
                return false;
            }
            slots.revision += 1;
            (released, slots.state())
        };
        self.inner.changes.send_replace(state);

        let host = self.attached_host();
        for (slot, presented) in &released {
            let name = presented.coordinator.name().to_string();
            tracing::debug!("Context {} cleared {} slot ({})", self.id(), slot, name);
            if let Some(host) = &host {
                host.on_event(&NavigationEvent::Cleared {
                    context: self.id(),
                    slot: *slot,
                    coordinator: name,
                });
            }
        }
        true
    }
}

impl PartialEq for NavigationContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for NavigationContext {}

impl fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationContext")
            .field("id", &self.id())
            .field("parent", &self.parent().map(|p| p.id()))
            .field("state", &self.state())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::ContentCoordinator;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        policy: ConflictPolicy,
        registered: Mutex<Vec<String>>,
        events: Mutex<Vec<NavigationEvent>>,
    }

    impl NavigationHost for RecordingHost {
        fn register(&self, coordinator: &SharedCoordinator) {
            self.registered.lock().push(coordinator.name().to_string());
        }

        fn conflict_policy(&self) -> ConflictPolicy {
            self.policy
        }

        fn on_event(&self, event: &NavigationEvent) {
            self.events.lock().push(event.clone());
        }
    }

    fn screen(name: &'static str) -> impl FnOnce(NavigationContext) -> ContentCoordinator {
        move |context| ContentCoordinator::new(name, context, View::new(name))
    }

    fn root() -> ContentCoordinator {
        ContentCoordinator::root("root", View::new("root"))
    }

    #[test]
    fn test_push_sets_push_slot() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();

        assert!(root.context().push_visible());
        assert_eq!(root.context().push_content(), Some(a.view()));
        assert!(!root.context().sheet_visible());
        assert!(!root.context().fullscreen_visible());
    }

    #[test]
    fn test_present_wraps_in_navigation() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Present { modal: true }, screen("a"))
            .unwrap();

        assert!(root.context().sheet_visible());
        let content = root.context().sheet_content().unwrap();
        assert!(content.is_in_navigation());
        assert!(content.interactive_dismiss_disabled());
        assert_eq!(content.without_navigation(), &a.view());
    }

    #[test]
    fn test_present_non_modal_allows_interactive_dismissal() {
        let root = root();
        root.context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();

        let content = root.context().sheet_content().unwrap();
        assert!(!content.interactive_dismiss_disabled());
    }

    #[test]
    fn test_dismiss_clears_parent_sheet() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();

        assert!(a.context().dismiss());
        assert!(!root.context().sheet_visible());
        assert_eq!(root.context().sheet_content(), None);
    }

    #[test]
    fn test_dismiss_clears_parent_fullscreen() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::FullscreenModal, screen("a"))
            .unwrap();
        assert!(root.context().fullscreen_visible());
        assert!(root.context().fullscreen_content().unwrap().is_in_navigation());

        assert!(a.context().dismiss());
        assert!(!root.context().fullscreen_visible());
    }

    #[test]
    fn test_dismiss_root_is_noop() {
        let root = root();
        root.context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        let before = root.context().state();

        assert!(!root.context().dismiss());
        assert_eq!(root.context().state(), before);
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();

        assert!(a.context().dismiss());
        let after_first = root.context().state();
        assert!(!a.context().dismiss());
        assert_eq!(root.context().state(), after_first);
    }

    #[test]
    fn test_pop_only_touches_own_context() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        a.context()
            .transition_to(PresentationStyle::Push, screen("b"))
            .unwrap();

        assert!(a.context().pop());
        assert!(!a.context().push_visible());
        assert!(root.context().push_visible());

        // Nothing pushed from b
        assert!(!a.context().pop());
    }

    #[test]
    fn test_back_pops_pushed_child() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();

        assert!(a.context().back());
        assert!(!root.context().push_visible());
    }

    #[test]
    fn test_back_dismisses_presented_child() {
        let root = root();
        root.context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        let b = root
            .context()
            .transition_to(PresentationStyle::FullscreenModal, screen("b"))
            .unwrap();

        assert!(b.context().back());
        assert!(!root.context().fullscreen_visible());
        assert!(root.context().push_visible());
    }

    #[test]
    fn test_transition_requires_parenting() {
        let root = root();
        let stranger = Arc::new(ContentCoordinator::root("stranger", View::new("x")));

        let err = root
            .context()
            .transition(PresentationStyle::Push, stranger.clone())
            .unwrap_err();
        assert_eq!(
            err,
            NavigationError::NotParented {
                parent: root.context().id(),
                child: stranger.context().id(),
            }
        );
        assert!(root.context().state().is_idle());
    }

    #[test]
    fn test_occupied_slot_is_rejected_by_default() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();

        let err = root
            .context()
            .transition_to(PresentationStyle::Present { modal: true }, screen("b"))
            .unwrap_err();
        assert!(matches!(err, NavigationError::SlotOccupied { slot: Slot::Sheet, .. }));
        assert_eq!(
            root.context().sheet_content().unwrap().without_navigation(),
            &a.view()
        );
    }

    #[test]
    fn test_replace_policy_overwrites_slot() {
        let root = root();
        let host: Arc<RecordingHost> = Arc::new(RecordingHost {
            policy: ConflictPolicy::Replace,
            ..Default::default()
        });
        let weak = Arc::downgrade(&host);
        let weak: Weak<dyn NavigationHost> = weak;
        root.context().attach_host(weak).unwrap();

        let a = root
            .context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        let b = root
            .context()
            .transition_to(PresentationStyle::Push, screen("b"))
            .unwrap();

        assert_eq!(root.context().push_content(), Some(b.view()));
        assert_eq!(Arc::strong_count(&a), 1);

        let events = host.events.lock();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1],
            NavigationEvent::Cleared {
                context: root.context().id(),
                slot: Slot::Push,
                coordinator: "a".to_string(),
            }
        );
        assert!(matches!(&events[2], NavigationEvent::Transitioned { coordinator, .. } if coordinator == "b"));
    }

    #[test]
    fn test_replace_style_swaps_topmost_child() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        root.context()
            .transition_to(PresentationStyle::Present { modal: true }, screen("b"))
            .unwrap();

        let c = root
            .context()
            .transition_to(PresentationStyle::Replace, screen("c"))
            .unwrap();

        let sheet = root.context().sheet_content().unwrap();
        assert_eq!(sheet.without_navigation(), &c.view());
        assert!(sheet.interactive_dismiss_disabled());
        assert_eq!(root.context().push_content(), Some(a.view()));
    }

    #[test]
    fn test_replace_style_reports_released_child() {
        let root = root();
        let host = Arc::new(RecordingHost::default());
        let weak = Arc::downgrade(&host);
        let weak: Weak<dyn NavigationHost> = weak;
        root.context().attach_host(weak).unwrap();

        root.context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("first"))
            .unwrap();
        root.context()
            .transition_to(PresentationStyle::Replace, screen("second"))
            .unwrap();

        let events = host.events.lock();
        let kinds: Vec<(&str, Slot)> = events
            .iter()
            .map(|e| match e {
                NavigationEvent::Transitioned { coordinator, .. } => (coordinator.as_str(), e.slot()),
                NavigationEvent::Cleared { coordinator, .. } => (coordinator.as_str(), e.slot()),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![("first", Slot::Sheet), ("first", Slot::Sheet), ("second", Slot::Sheet)]
        );
        assert!(matches!(events[1], NavigationEvent::Cleared { .. }));
        assert_eq!(*host.registered.lock(), vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_replace_style_with_nothing_presented() {
        let root = root();
        let err = root
            .context()
            .transition_to(PresentationStyle::Replace, screen("a"))
            .unwrap_err();
        assert_eq!(err, NavigationError::NothingToReplace(root.context().id()));
    }

    #[test]
    fn test_dismiss_releases_child() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();
        let weak = Arc::downgrade(&a);
        let a_context = a.context().clone();
        drop(a);

        assert!(weak.upgrade().is_some());
        assert!(a_context.dismiss());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_child_does_not_keep_parent_alive() {
        let parent = NavigationContext::root();
        let child = NavigationContext::child_of(&parent);
        assert!(child.is_child_of(&parent));
        assert_eq!(child.parent(), Some(parent.clone()));

        drop(parent);
        assert!(child.parent().is_none());
        assert!(!child.is_root());
        assert!(!child.dismiss());
    }

    #[test]
    fn test_host_registration_and_events() {
        let root = root();
        let host = Arc::new(RecordingHost::default());
        let weak = Arc::downgrade(&host);
        let weak: Weak<dyn NavigationHost> = weak;
        root.context().attach_host(weak).unwrap();

        let a = root
            .context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        a.context()
            .transition_to(PresentationStyle::Push, screen("b"))
            .unwrap();
        assert!(a.context().pop());

        assert_eq!(*host.registered.lock(), vec!["a".to_string(), "b".to_string()]);
        let events = host.events.lock();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].context(), root.context().id());
        assert_eq!(events[1].context(), a.context().id());
        assert_eq!(events[1].slot(), Slot::Push);
        assert!(matches!(events[2], NavigationEvent::Cleared { slot: Slot::Push, .. }));
    }

    #[test]
    fn test_attach_host_rules() {
        let root = NavigationContext::root();
        let child = NavigationContext::child_of(&root);
        let host = Arc::new(RecordingHost::default());
        let weak = Arc::downgrade(&host);
        let weak: Weak<dyn NavigationHost> = weak;

        assert_eq!(
            child.attach_host(weak.clone()).unwrap_err(),
            NavigationError::NotRoot(child.id())
        );
        root.attach_host(weak.clone()).unwrap();
        assert_eq!(
            root.attach_host(weak).unwrap_err(),
            NavigationError::HostAlreadyAttached(root.id())
        );
        assert!(child.host().is_some());

        root.detach_host();
        assert!(child.host().is_none());
    }

    #[test]
    fn test_detached_context_stops_reporting() {
        let root = root();
        let host = Arc::new(RecordingHost::default());
        let weak = Arc::downgrade(&host);
        let weak: Weak<dyn NavigationHost> = weak;
        root.context().attach_host(weak).unwrap();

        let a = root
            .context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();
        assert!(a.context().is_attached());
        assert!(a.context().dismiss());
        assert!(!a.context().is_attached());

        // Still usable locally, but no longer part of the tree
        a.context()
            .transition_to(PresentationStyle::Push, screen("b"))
            .unwrap();
        assert!(a.context().push_visible());
        assert!(a.context().pop());

        assert_eq!(*host.registered.lock(), vec!["a".to_string()]);
        assert_eq!(host.events.lock().len(), 2);
    }

    #[test]
    fn test_is_attached_follows_presented_slots() {
        let root = root();
        assert!(root.context().is_attached());

        let unpresented = NavigationContext::child_of(root.context());
        assert!(!unpresented.is_attached());

        let a = root
            .context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        let b = a
            .context()
            .transition_to(PresentationStyle::FullscreenModal, screen("b"))
            .unwrap();
        assert!(b.context().is_attached());

        assert!(root.context().pop());
        assert!(!a.context().is_attached());
        assert!(!b.context().is_attached());
    }

    #[test]
    fn test_state_readable_while_publish_waits_on_borrow() {
        let root = root();
        root.context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();
        let context = root.context().clone();
        let rx = context.subscribe();
        let held = rx.borrow();
        assert!(held.sheet_visible);

        let worker = {
            let context = context.clone();
            std::thread::spawn(move || context.clear_slot(Slot::Sheet))
        };

        // The worker blocks on publishing until `held` is released, but the
        // slots themselves must already be readable
        let mut cleared = false;
        for _ in 0..500 {
            if !context.sheet_visible() {
                cleared = true;
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        drop(held);

        assert!(cleared);
        assert!(worker.join().unwrap());
        assert!(!rx.borrow().sheet_visible);
        assert_eq!(context.state().revision, 2);
    }

    #[test]
    fn test_revision_counts_changes() {
        let root = root();
        let a = root
            .context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();
        a.context().dismiss();
        a.context().dismiss();

        assert_eq!(root.context().state().revision, 2);
    }

    #[test]
    fn test_children_are_topmost_first() {
        let root = root();
        root.context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        root.context()
            .transition_to(PresentationStyle::FullscreenModal, screen("b"))
            .unwrap();

        let slots: Vec<Slot> = root.context().children().into_iter().map(|(s, _)| s).collect();
        assert_eq!(slots, vec![Slot::Fullscreen, Slot::Push]);
        assert_eq!(root.context().state().topmost(), Some(Slot::Fullscreen));
    }

    #[test]
    fn test_reset_and_clear_slot() {
        let root = root();
        root.context()
            .transition_to(PresentationStyle::Push, screen("a"))
            .unwrap();
        root.context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("b"))
            .unwrap();

        assert!(root.context().clear_slot(Slot::Sheet));
        assert!(!root.context().clear_slot(Slot::Sheet));
        assert!(root.context().reset());
        assert!(root.context().state().is_idle());
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let root = root();
        let mut rx = root.context().subscribe();
        assert!(rx.borrow().is_idle());

        let a = root
            .context()
            .transition_to(PresentationStyle::Present { modal: false }, screen("a"))
            .unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().sheet_visible);

        a.context().dismiss();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().sheet_visible);
    }
}
