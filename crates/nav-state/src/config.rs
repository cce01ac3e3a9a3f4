//! Navigator configuration

use nav_core::ConflictPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration could not be parsed
    #[error("Invalid navigator config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a [`CoordinatorRegistry`](crate::CoordinatorRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// What to do when a transition targets an occupied slot
    pub conflict_policy: ConflictPolicy,
    /// Place the root view in a navigation container so it can push
    pub wrap_root_in_navigation: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::Reject,
            wrap_root_in_navigation: false,
        }
    }
}

impl NavigatorConfig {
    /// Parse a configuration from JSON
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the conflict policy
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Set whether the root view is wrapped in a navigation container
    pub fn with_root_navigation(mut self, wrap: bool) -> Self {
        self.wrap_root_in_navigation = wrap;
        self
    }
}
