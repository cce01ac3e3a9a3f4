//! Presentation styles and slots
//!
//! A [`PresentationStyle`] says how a child coordinator should appear relative
//! to the coordinator that opens it. Every style except [`PresentationStyle::Replace`]
//! maps onto one of the three [`Slot`]s held by a navigation context.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Presentation Style
// =============================================================================

/// How a child coordinator is presented by its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum PresentationStyle {
    /// Push onto the parent's navigation container
    #[default]
    Push,
    /// Present as a sheet
    Present {
        /// Disables interactive (swipe) dismissal of the sheet
        modal: bool,
    },
    /// Present covering the whole screen
    FullscreenModal,
    /// Swap the child currently presented by the parent
    Replace,
}

impl PresentationStyle {
    /// Get the slot this style presents into
    ///
    /// `Replace` reuses whatever slot is currently on top, so it has none of its own.
    pub fn slot(&self) -> Option<Slot> {
        match self {
            PresentationStyle::Push => Some(Slot::Push),
            PresentationStyle::Present { .. } => Some(Slot::Sheet),
            PresentationStyle::FullscreenModal => Some(Slot::Fullscreen),
            PresentationStyle::Replace => None,
        }
    }

    /// Check if the presented child blocks interactive dismissal
    pub fn is_modal(&self) -> bool {
        matches!(self, PresentationStyle::Present { modal: true })
    }
}

impl fmt::Display for PresentationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentationStyle::Push => write!(f, "push"),
            PresentationStyle::Present { modal: true } => write!(f, "present(modal)"),
            PresentationStyle::Present { modal: false } => write!(f, "present"),
            PresentationStyle::FullscreenModal => write!(f, "fullscreen"),
            PresentationStyle::Replace => write!(f, "replace"),
        }
    }
}

// =============================================================================
// Slots
// =============================================================================

/// A presentation slot on a navigation context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Pushed destination
    Push,
    /// Sheet presentation
    Sheet,
    /// Fullscreen presentation
    Fullscreen,
}

impl Slot {
    /// Get all slots, topmost first
    ///
    /// A fullscreen cover hides a sheet, which in turn hides a pushed destination.
    pub fn all() -> [Slot; 3] {
        [Slot::Fullscreen, Slot::Sheet, Slot::Push]
    }

    /// Check if the slot wraps its content in its own navigation container
    pub fn wraps_in_navigation(&self) -> bool {
        !matches!(self, Slot::Push)
    }

    /// Get the label used in paths and logs
    pub fn label(&self) -> &'static str {
        match self {
            Slot::Push => "push",
            Slot::Sheet => "sheet",
            Slot::Fullscreen => "fullscreen",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
