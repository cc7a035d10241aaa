//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: formatted text, selection flags
//! and highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use provider_directory::ui::viewmodel::{BodyView, EmptyState, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Provider Directory ".to_string(), freshness: None },
//!     filter_bar: Default::default(),
//!     suggestions: vec![],
//!     body: BodyView::Empty(EmptyState {
//!         message: "No providers loaded".to_string(),
//!         subtitle: "Type 'org <id>' to load a roster".to_string(),
//!     }),
//!     status: None,
//!     footer: FooterInfo { keybindings: "quit: exit".to_string() },
//! };
//! # let _ = vm;
//! ```

use crate::domain::{LatLng, PatientAcceptance};
use crate::map::PopupContent;
use crate::table::TableViewModel;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub filter_bar: FilterBarInfo,

    /// Ranked search suggestions, shown under the filter bar when present.
    pub suggestions: Vec<SuggestionItem>,

    /// Main content area.
    pub body: BodyView,

    /// Load progress or error line.
    pub status: Option<StatusLine>,

    pub footer: FooterInfo,
}

/// Main content area.
#[derive(Debug, Clone)]
pub enum BodyView {
    /// Card list beside the map panel.
    Map { cards: CardList, panel: MapPanel },

    /// Virtualized roster table; `selected` is the highlighted row index.
    Table {
        grid: TableViewModel,
        selected: Option<usize>,
    },

    /// Nothing to show yet (no roster, or everything filtered out).
    Empty(EmptyState),
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text, e.g. `" Harbor Health (3/12) "`.
    pub title: String,

    /// How long ago the roster was loaded, e.g. `"updated 5m ago"`.
    pub freshness: Option<String>,
}

/// One text filter as shown in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: &'static str,
    pub value: String,
    /// The value is still inside its debounce window.
    pub pending: bool,
}

/// Filter bar display information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub chips: Vec<FilterChip>,
    pub accepting_new_patients: bool,
    pub include_inactive: bool,
    /// Full state name when the state filter matches a known state code.
    pub state_hint: Option<String>,
}

/// One ranked suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub name: String,
    pub kind: &'static str,
    pub detail: Option<String>,
    /// Character ranges `(start, end)` of `name` that matched the query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Windowed card list.
#[derive(Debug, Clone, Default)]
pub struct CardList {
    pub cards: Vec<CardItem>,
    /// Index of the first card in the filtered list.
    pub first_index: usize,
    pub total: usize,
}

/// One record card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Position in the filtered list.
    pub index: usize,
    pub title: String,
    pub address: String,
    pub phone: Option<String>,
    pub acceptance: PatientAcceptance,
    pub inactive: bool,
    pub is_selected: bool,
    /// The record has coordinates and therefore a marker.
    pub on_map: bool,
}

/// A marker placed in the map panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPin {
    pub column: usize,
    pub row: usize,
    pub glyph: char,
    pub is_selected: bool,
}

/// Text rendition of the map surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapPanel {
    pub width: usize,
    pub height: usize,
    pub pins: Vec<MapPin>,
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
    pub popup: Option<PopupContent>,
    /// Markers outside the visible area.
    pub hidden_markers: usize,
}

/// Status line below the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub is_error: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Command help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No providers match these filters").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
