//! Coordinator registry and navigation tree state for Navigator
//!
//! This crate owns navigation trees built with `nav-core`: it installs the
//! root coordinator, tracks every coordinator created below it for as long as
//! it is presented, and exposes the tree to renderers, observers and tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod observer;
pub mod registry;
pub mod snapshot;

pub use config::{ConfigError, NavigatorConfig};
pub use observer::NavigationObserver;
pub use registry::{CoordinatorRegistry, RegistryError, Result};
pub use snapshot::{ChildSnapshot, NodeSnapshot, TreeSnapshot};
