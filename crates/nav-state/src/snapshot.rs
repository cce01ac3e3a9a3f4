//! Snapshots of the presented tree
//!
//! A [`TreeSnapshot`] is a serializable copy of what is currently presented,
//! starting at the root coordinator and following every visible slot. It is
//! what tests, deep-link bookkeeping and diagnostics look at instead of the
//! live tree.

use nav_core::{ContextId, Coordinator, PresentationState, Slot};
use serde::{Deserialize, Serialize};

/// One coordinator in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Coordinator name
    pub name: String,
    /// Context of the coordinator
    pub context: ContextId,
    /// Visibility flags of the context
    pub state: PresentationState,
    /// Presented children, topmost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildSnapshot>,
}

/// A presented child in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSnapshot {
    /// Slot presenting the child
    pub slot: Slot,
    /// Interactive dismissal is disabled
    #[serde(default)]
    pub modal: bool,
    /// The child itself
    pub node: NodeSnapshot,
}

/// Snapshot of everything presented below a root coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Root coordinator
    pub root: NodeSnapshot,
}

impl TreeSnapshot {
    /// Capture the tree below `root`
    pub fn capture(root: &dyn Coordinator) -> Self {
        Self {
            root: capture_node(root),
        }
    }

    /// Follow the topmost child from the root to the visible screen
    ///
    /// The first element is the root, which has no slot.
    pub fn visible_path(&self) -> Vec<(Option<Slot>, &NodeSnapshot)> {
        let mut path = vec![(None, &self.root)];
        let mut node = &self.root;
        while let Some(child) = node.children.first() {
            path.push((Some(child.slot), &child.node));
            node = &child.node;
        }
        path
    }

    /// Get the screen the user currently sees
    pub fn topmost(&self) -> &NodeSnapshot {
        let mut node = &self.root;
        while let Some(child) = node.children.first() {
            node = &child.node;
        }
        node
    }

    /// Number of screens stacked along the visible path
    pub fn depth(&self) -> usize {
        self.visible_path().len()
    }

    /// Number of presented coordinators, root included
    pub fn node_count(&self) -> usize {
        fn count(node: &NodeSnapshot) -> usize {
            1 + node.children.iter().map(|c| count(&c.node)).sum::<usize>()
        }
        count(&self.root)
    }

    /// Find a presented coordinator by name
    pub fn find(&self, name: &str) -> Option<&NodeSnapshot> {
        fn search<'a>(node: &'a NodeSnapshot, name: &str) -> Option<&'a NodeSnapshot> {
            if node.name == name {
                return Some(node);
            }
            node.children.iter().find_map(|c| search(&c.node, name))
        }
        search(&self.root, name)
    }

    /// Render the visible path as a deep-link style path
    ///
    /// `/root/push:detail/sheet:editor`
    pub fn to_path(&self) -> String {
        self.visible_path()
            .into_iter()
            .map(|(slot, node)| {
                let name = urlencoding::encode(&node.name);
                match slot {
                    Some(slot) => format!("/{}:{}", slot.label(), name),
                    None => format!("/{}", name),
                }
            })
            .collect()
    }

    /// Serialize the snapshot to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn capture_node(coordinator: &dyn Coordinator) -> NodeSnapshot {
    let context = coordinator.context();
    let children = context
        .children()
        .into_iter()
        .map(|(slot, presented)| ChildSnapshot {
            slot,
            modal: presented.view().interactive_dismiss_disabled(),
            node: capture_node(&**presented.coordinator()),
        })
        .collect();

    NodeSnapshot {
        name: coordinator.name().to_string(),
        context: context.id(),
        state: context.state(),
        children,
    }
}
