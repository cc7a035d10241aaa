//! View and load state types for the application.
//!
//! [`ViewMode`] picks which consumer of the filtered list is on screen, and
//! [`LoadState`] tracks the roster fetch lifecycle for the current organization.
//!
//! # Example
//!
//! ```rust
//! use provider_directory::app::modes::{LoadState, ViewMode};
//!
//! let view_mode = ViewMode::Map;
//! let load_state = LoadState::Idle;
//! assert!(!load_state.is_busy());
//! # let _ = view_mode;
//! ```

use crate::domain::RecordId;

/// Message shown when a fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "No results found. Try different search criteria.";

/// Which view of the filtered records is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Card list next to the map, sharing one selection.
    #[default]
    Map,

    /// Virtualized roster table.
    Table,
}

impl ViewMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "Map",
            Self::Table => "Table",
        }
    }
}

/// Lifecycle of the organization roster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// Checking whether the organization has directory data.
    Checking(RecordId),

    /// Fetching the roster.
    Loading(RecordId),

    /// Roster loaded.
    Ready,

    /// The organization has no directory data. The roster is not loaded.
    NotFound(RecordId),

    /// A fetch failed; carries the user-facing message.
    Failed(String),
}

impl LoadState {
    /// Returns `true` while a roster-related request is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Checking(_) | Self::Loading(_))
    }

    /// User-facing status line for this state, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Idle | Self::Ready => None,
            Self::Checking(id) => Some(format!("Checking organization {id}...")),
            Self::Loading(id) => Some(format!("Loading providers for organization {id}...")),
            Self::NotFound(id) => Some(format!("No organization data found for {id}.")),
            Self::Failed(message) => Some(message.clone()),
        }
    }

    /// Returns `true` for states that should be rendered as errors.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Failed(_))
    }
}
