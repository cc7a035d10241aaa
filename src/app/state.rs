//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container of the
//! directory: the raw roster, the committed filter criteria, the filtered list
//! both views consume, the shared selection, and everything the terminal needs
//! to draw a frame.
//!
//! # Architecture
//!
//! `AppState` separates core data (records, criteria) from derived state
//! (filtered list, table rows, selection index). Every change to the inputs
//! goes through [`AppState::apply_filters`], which recomputes the derived
//! state in one place and returns the view side effects (marker refresh,
//! scroll-into-view, fly-to) as [`Action`]s. View models are computed on demand
//! from state snapshots.
//!
//! # Example
//!
//! ```rust
//! use provider_directory::app::state::{AppSettings, AppState};
//! use provider_directory::domain::LocationRecord;
//! use provider_directory::map::CameraState;
//! use provider_directory::ui::theme::Theme;
//!
//! let mut state = AppState::new(AppSettings::default(), Theme::default());
//! let records = vec![LocationRecord {
//!     practitioner_id: "1".into(),
//!     practice_location_id: "10".into(),
//!     full_name: Some("Alice".into()),
//!     ..Default::default()
//! }];
//! let _actions = state.replace_records(records, None);
//! let viewmodel = state.compute_viewmodel(24, 100, &CameraState::new());
//! assert_eq!(viewmodel.header.title, " Provider Directory (1/1) ");
//! ```

use super::actions::Action;
use super::debounce::{Debouncer, TimerLane};
use super::modes::{LoadState, ViewMode, FETCH_FAILED_MESSAGE};
use super::requests::RequestTracker;
use super::selection::{SelectionChange, SelectionCoordinator};
use crate::api::{PractitionerProfile, StateOption, Suggestion};
use crate::domain::{ActivityStatus, Bounds, FilterCriteria, LocationRecord, PatientAcceptance, RecordId, RecordKey, TextField};
use crate::filter::filter_records;
use crate::map::{CameraState, MapSettings, MapView};
use crate::table::{self, window, CellRenderer, ColumnConfig, Row, ScrollAlign, TableModel, TableSettings};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, CardItem, CardList, EmptyState, FilterBarInfo, FilterChip, FooterInfo, HeaderInfo, MapPanel, MapPin,
    StatusLine, SuggestionItem, UIViewModel,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Rows taken by the header (title plus border).
const HEADER_ROWS: usize = 2;

/// Rows taken by the filter bar (chips plus toggles).
const FILTER_BAR_ROWS: usize = 2;

/// Rows taken by the status line.
const STATUS_ROWS: usize = 1;

/// Rows taken by the footer (border plus help text).
const FOOTER_ROWS: usize = 2;

/// Most suggestions shown under the filter bar.
pub const MAX_SUGGESTIONS: usize = 5;

/// Terminal rows per record card.
pub const CARD_HEIGHT: usize = 4;

/// Narrowest card column.
const MIN_LIST_WIDTH: usize = 32;

/// Zoom assumed for a centered viewport that has no explicit zoom.
const DEFAULT_PANEL_ZOOM: f64 = 10.0;

/// Map cells per 256px tile, assuming 8px wide cells.
const CELLS_PER_TILE: f64 = 32.0;

/// Terminal cells are about twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Smallest span (in degrees) a fitted viewport is widened to.
const MIN_SPAN_DEGREES: f64 = 0.01;

/// Tunables that feed the state's adapters.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub map: MapSettings,
    pub table: TableSettings,
    /// Quiet period for text filters and suggestion queries.
    pub debounce: Duration,
    pub scroll_align: ScrollAlign,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            map: MapSettings::default(),
            table: roster_table_settings(TableSettings::default()),
            debounce: Duration::from_millis(400),
            scroll_align: ScrollAlign::default(),
        }
    }
}

/// Applies the roster's column layout on top of `base`.
///
/// Identifiers, coordinates and name parts are hidden; the remaining columns
/// start with name, location and phone, and the sentinel-coded status columns
/// get readable labels.
#[must_use]
pub fn roster_table_settings(base: TableSettings) -> TableSettings {
    let exclude_keys = [
        "practitionerId",
        "practiceLocationId",
        "firstName",
        "lastName",
        "latitude",
        "longitude",
        "officePhoneExtension",
        "participatingOrganizationId",
        "rosterId",
    ]
    .map(String::from)
    .to_vec();

    let column_order = [
        "fullName",
        "practiceLocationName",
        "addressLine1",
        "city",
        "state",
        "zip",
        "officePhoneNumber",
        "acceptNewPatients",
        "stateCode",
    ]
    .map(String::from)
    .to_vec();

    let mut column_config = HashMap::new();
    column_config.insert("fullName".to_string(), ColumnConfig::labeled("Provider").with_width(200));
    column_config.insert("practiceLocationName".to_string(), ColumnConfig::labeled("Location").with_width(160));
    column_config.insert("addressLine1".to_string(), ColumnConfig::labeled("Address").with_width(180));
    column_config.insert("zip".to_string(), ColumnConfig::labeled("ZIP").with_width(64));
    column_config.insert(
        "officePhoneNumber".to_string(),
        ColumnConfig::labeled("Phone").with_renderer(CellRenderer::new(|value, row| {
            let phone = table::display_value(Some(value));
            match row.get("officePhoneExtension").and_then(Value::as_str) {
                Some(ext) if !phone.is_empty() && !ext.trim().is_empty() => format!("{phone} x{}", ext.trim()),
                _ => phone,
            }
        })),
    );
    column_config.insert(
        "acceptNewPatients".to_string(),
        ColumnConfig::labeled("Accepting").with_width(88).with_renderer(CellRenderer::new(|value, _| {
            match PatientAcceptance::from_code(value.as_i64()) {
                PatientAcceptance::Accepting => "Yes".to_string(),
                PatientAcceptance::NotAccepting => "No".to_string(),
                PatientAcceptance::Unknown => String::new(),
            }
        })),
    );
    column_config.insert(
        "stateCode".to_string(),
        ColumnConfig::labeled("Status").with_width(80).with_renderer(CellRenderer::new(|value, _| {
            ActivityStatus::from_code(value.as_i64()).label().to_string()
        })),
    );

    TableSettings {
        exclude_keys,
        column_config,
        column_order: Some(column_order),
        ..base
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input, timers and fetch
/// results. Both views (cards plus map, and the table) read `filtered` and
/// `selection`; neither keeps a private copy.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Full roster for the current organization, in API order.
    pub records: Vec<LocationRecord>,

    /// Records passing the committed criteria. Recomputed by
    /// [`apply_filters`](Self::apply_filters) only.
    pub filtered: Vec<LocationRecord>,

    /// `filtered` as table rows.
    pub table_rows: Vec<Row>,

    /// Criteria the filtered list was computed from.
    ///
    /// Text edits sit in the filter debouncer until their quiet period ends;
    /// the two toggles are committed immediately.
    pub criteria: FilterCriteria,

    pub selection: SelectionCoordinator,

    pub map_view: MapView,

    pub table: TableModel,

    pub view_mode: ViewMode,

    pub load_state: LoadState,

    pub organization_id: Option<RecordId>,

    pub organization_name: Option<String>,

    /// Organization awaiting its existence check and roster fetch.
    pub(crate) pending_organization: Option<(RecordId, Option<String>)>,

    /// Index of the first visible card.
    pub list_scroll: usize,

    /// Index of the first visible table row.
    pub table_scroll: usize,

    pub scroll_align: ScrollAlign,

    /// Text typed into the search box.
    pub suggestion_query: String,

    /// Suggestions for `suggestion_query`, best match first.
    pub suggestions: Vec<Suggestion>,

    /// The last suggestion fetch for `suggestion_query` failed.
    pub suggestions_failed: bool,

    /// Known states for the state filter hint.
    pub states: Vec<StateOption>,

    /// Profile of the selected practitioner, once requested.
    pub profile: Option<PractitionerProfile>,

    /// When the current roster arrived.
    pub loaded_at: Option<DateTime<Utc>>,

    pub theme: Theme,

    pub(crate) filter_debounce: Debouncer<FilterCriteria>,

    pub(crate) suggestion_debounce: Debouncer<String>,

    pub(crate) requests: RequestTracker,

    list_viewport: usize,

    table_viewport: usize,
}

impl AppState {
    /// Creates an empty state: no roster, default criteria, map view.
    ///
    /// # Parameters
    ///
    /// * `settings` - Map, table, debounce and scrolling tunables
    /// * `theme` - Color scheme for UI rendering
    ///
    /// # Example
    ///
    /// ```rust
    /// use provider_directory::app::state::{AppSettings, AppState};
    /// use provider_directory::ui::theme::Theme;
    ///
    /// let state = AppState::new(AppSettings::default(), Theme::default());
    /// assert!(state.filtered.is_empty());
    /// assert_eq!(state.selection.selected_index(), None);
    /// ```
    #[must_use]
    pub fn new(settings: AppSettings, theme: Theme) -> Self {
        Self {
            records: Vec::new(),
            filtered: Vec::new(),
            table_rows: Vec::new(),
            criteria: FilterCriteria::default(),
            selection: SelectionCoordinator::new(),
            map_view: MapView::new(settings.map),
            table: TableModel::new(settings.table),
            view_mode: ViewMode::default(),
            load_state: LoadState::default(),
            organization_id: None,
            organization_name: None,
            pending_organization: None,
            list_scroll: 0,
            table_scroll: 0,
            scroll_align: settings.scroll_align,
            suggestion_query: String::new(),
            suggestions: Vec::new(),
            suggestions_failed: false,
            states: Vec::new(),
            profile: None,
            loaded_at: None,
            theme,
            filter_debounce: Debouncer::new(TimerLane::Filters, settings.debounce),
            suggestion_debounce: Debouncer::new(TimerLane::Suggestions, settings.debounce),
            requests: RequestTracker::new(),
            list_viewport: 1,
            table_viewport: 1,
        }
    }

    /// Criteria as the user currently sees them: the debounced snapshot if a
    /// text edit is pending, the committed criteria otherwise.
    #[must_use]
    pub fn pending_criteria(&self) -> &FilterCriteria {
        self.filter_debounce.pending().unwrap_or(&self.criteria)
    }

    /// Returns the selected record, if it is in the filtered list.
    #[must_use]
    pub fn selected_record(&self) -> Option<&LocationRecord> {
        self.selection.selected_record(&self.filtered)
    }

    /// Recomputes the filtered list and everything derived from it.
    ///
    /// Returns the marker refresh for the map followed by whatever the
    /// selection change requires (scroll-into-view, fly-to, popup).
    pub fn apply_filters(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!(
            "apply_filters",
            total = self.records.len(),
            accepting_new_patients = self.criteria.accepting_new_patients,
            include_inactive = self.criteria.include_inactive,
        )
        .entered();

        self.filtered = filter_records(&self.records, Some(&self.criteria)).into_owned();
        self.table_rows = match table::rows_from_records(&self.filtered) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "failed to build table rows");
                Vec::new()
            }
        };
        self.list_scroll = window::clamp_scroll(self.filtered.len(), self.list_scroll, self.list_viewport);
        self.table_scroll = window::clamp_scroll(self.table_rows.len(), self.table_scroll, self.table_viewport);

        let mut actions: Vec<Action> = self
            .map_view
            .refresh(&self.filtered)
            .into_iter()
            .map(Action::Map)
            .collect();

        let change = self.selection.sync(&self.filtered);
        actions.extend(self.selection_actions(change));

        tracing::debug!(
            filtered = self.filtered.len(),
            selected_index = ?self.selection.selected_index(),
            "filters applied"
        );
        actions
    }

    /// Installs a new roster, forgetting the previous selection and scroll.
    pub fn replace_records(&mut self, records: Vec<LocationRecord>, organization_id: Option<RecordId>) -> Vec<Action> {
        tracing::debug!(count = records.len(), organization = ?organization_id, "replacing roster");

        self.records = records;
        if organization_id.is_some() {
            self.organization_id = organization_id;
        }
        self.selection.reset();
        self.list_scroll = 0;
        self.table_scroll = 0;
        self.profile = None;
        self.loaded_at = Some(Utc::now());
        self.load_state = LoadState::Ready;
        self.apply_filters()
    }

    /// Selects `key` as if its card or marker had been clicked.
    pub fn select_key(&mut self, key: RecordKey) -> Vec<Action> {
        let change = self.selection.select(key, &self.filtered);
        self.selection_actions(change)
    }

    /// View side effects of a selection change.
    pub fn selection_actions(&self, change: SelectionChange) -> Vec<Action> {
        let mut actions = Vec::new();
        if let SelectionChange::Activated(index) = change {
            actions.push(Action::ScrollIntoView {
                index,
                align: self.scroll_align,
            });
        }
        actions.extend(
            self.map_view
                .on_selection(change, &self.filtered)
                .into_iter()
                .map(Action::Map),
        );
        actions
    }

    /// Scrolls the card list and the table so row `index` is visible.
    pub fn scroll_into_view(&mut self, index: usize, align: ScrollAlign) {
        let total = self.filtered.len();
        self.list_scroll = window::clamp_scroll(
            total,
            window::scroll_offset_for(index, self.list_scroll, self.list_viewport, align),
            self.list_viewport,
        );
        self.table_scroll = window::clamp_scroll(
            total,
            window::scroll_offset_for(index, self.table_scroll, self.table_viewport, align),
            self.table_viewport,
        );
    }

    /// Moves the table window by `delta` rows. Returns `true` if it moved.
    pub fn scroll_table(&mut self, delta: isize) -> bool {
        let target = self.table_scroll.saturating_add_signed(delta);
        let clamped = window::clamp_scroll(self.table_rows.len(), target, self.table_viewport);
        let moved = clamped != self.table_scroll;
        self.table_scroll = clamped;
        moved
    }

    /// Orders `suggestions` by fuzzy score against `query`, best first.
    ///
    /// Entries the matcher rejects keep their server order after the matches.
    #[must_use]
    pub fn rank_suggestions(query: &str, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() {
            return suggestions;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(Option<i64>, Suggestion)> = suggestions
            .into_iter()
            .map(|suggestion| (matcher.fuzzy_match(&suggestion.name, query), suggestion))
            .collect();
        scored.sort_by(|(a, _), (b, _)| b.cmp(a));
        scored.into_iter().map(|(_, suggestion)| suggestion).collect()
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// Takes `&mut self` because the table model caches derived columns and
    /// the scroll helpers remember the viewport sizes of the last frame.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    /// * `camera` - Map surface state the map panel is drawn from
    ///
    /// # Layout
    ///
    /// Header, filter bar, up to [`MAX_SUGGESTIONS`] suggestion rows, body,
    /// status line and footer, top to bottom. In map mode the body is split
    /// into a card column and the map panel.
    pub fn compute_viewmodel(&mut self, rows: usize, cols: usize, camera: &CameraState) -> UIViewModel {
        let suggestions = self.compute_suggestions();
        let chrome = HEADER_ROWS + FILTER_BAR_ROWS + suggestions.len() + STATUS_ROWS + FOOTER_ROWS;
        let body_rows = rows.saturating_sub(chrome).max(1);

        UIViewModel {
            header: self.compute_header(Utc::now()),
            filter_bar: self.compute_filter_bar(),
            suggestions,
            body: self.compute_body(body_rows, cols, camera),
            status: self.compute_status(),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self, now: DateTime<Utc>) -> HeaderInfo {
        let name = self
            .organization_name
            .clone()
            .or_else(|| self.organization_id.as_ref().map(|id| format!("Organization {id}")))
            .unwrap_or_else(|| "Provider Directory".to_string());

        let title = if self.records.is_empty() {
            format!(" {name} ")
        } else {
            format!(" {name} ({}/{}) ", self.filtered.len(), self.records.len())
        };

        HeaderInfo {
            title,
            freshness: self
                .loaded_at
                .map(|loaded_at| format!("updated {}", freshness_label(loaded_at, now))),
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let pending = self.pending_criteria();
        let chips = [
            TextField::Name,
            TextField::City,
            TextField::State,
            TextField::Specialty,
            TextField::ProviderType,
        ]
        .into_iter()
        .map(|field| FilterChip {
            label: field.label(),
            value: pending.text(field).to_string(),
            pending: pending.text(field) != self.criteria.text(field),
        })
        .collect();

        let state = pending.state.trim();
        let state_hint = (!state.is_empty())
            .then(|| {
                self.states
                    .iter()
                    .find(|option| option.code.eq_ignore_ascii_case(state))
                    .map(|option| option.name.clone())
            })
            .flatten();

        FilterBarInfo {
            chips,
            accepting_new_patients: self.criteria.accepting_new_patients,
            include_inactive: self.criteria.include_inactive,
            state_hint,
        }
    }

    fn compute_suggestions(&self) -> Vec<SuggestionItem> {
        let query = self.suggestion_query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        self.suggestions
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|suggestion| SuggestionItem {
                name: suggestion.name.clone(),
                kind: suggestion.kind.label(),
                detail: suggestion.detail.clone(),
                highlight_ranges: compute_highlight_ranges(&suggestion.name, query, &matcher),
            })
            .collect()
    }

    fn compute_body(&mut self, body_rows: usize, cols: usize, camera: &CameraState) -> BodyView {
        if self.records.is_empty() {
            return BodyView::Empty(self.compute_empty_roster());
        }

        match self.view_mode {
            ViewMode::Table => {
                self.table_viewport = body_rows.saturating_sub(1).max(1);
                let grid = self.table.view(&self.table_rows, self.table_scroll, cols, body_rows);
                if let table::TableViewModel::Grid(view) = &grid {
                    self.table_scroll = view.scroll_offset;
                }
                BodyView::Table {
                    grid,
                    selected: self.selection.selected_index(),
                }
            }
            ViewMode::Map if self.filtered.is_empty() => BodyView::Empty(EmptyState {
                message: "No providers match these filters".to_string(),
                subtitle: "Adjust the filters or type 'clear'".to_string(),
            }),
            ViewMode::Map => {
                let list_width = (cols * 2 / 5).max(MIN_LIST_WIDTH).min(cols);
                self.list_viewport = (body_rows / CARD_HEIGHT).max(1);
                self.list_scroll = window::clamp_scroll(self.filtered.len(), self.list_scroll, self.list_viewport);

                BodyView::Map {
                    cards: self.compute_cards(),
                    panel: self.compute_map_panel(camera, cols.saturating_sub(list_width + 1), body_rows),
                }
            }
        }
    }

    fn compute_empty_roster(&self) -> EmptyState {
        match &self.load_state {
            LoadState::NotFound(_) | LoadState::Failed(_) => EmptyState {
                message: self.load_state.message().unwrap_or_default(),
                subtitle: "Choose another organization with 'org <id>'".to_string(),
            },
            state if state.is_busy() => EmptyState {
                message: "Loading providers...".to_string(),
                subtitle: state.message().unwrap_or_default(),
            },
            _ => EmptyState {
                message: "No providers loaded".to_string(),
                subtitle: "Type 'org <id>' or start with --roster <file>".to_string(),
            },
        }
    }

    fn compute_cards(&self) -> CardList {
        let selected = self.selection.selected_index();
        let end = (self.list_scroll + self.list_viewport).min(self.filtered.len());

        let cards = self.filtered[self.list_scroll..end]
            .iter()
            .enumerate()
            .map(|(offset, record)| {
                let index = self.list_scroll + offset;
                CardItem {
                    index,
                    title: record.display_name(),
                    address: record.formatted_address(),
                    phone: record.phone_display(),
                    acceptance: record.accept_new_patients,
                    inactive: record.is_inactive(),
                    is_selected: selected == Some(index),
                    on_map: record.coordinates().is_some(),
                }
            })
            .collect();

        CardList {
            cards,
            first_index: self.list_scroll,
            total: self.filtered.len(),
        }
    }

    /// Projects the camera's markers into a `width` x `height` panel.
    ///
    /// The panel keeps a one-cell border; pins are placed equirectangularly
    /// inside it. The selected pin is drawn last so it stays on top.
    fn compute_map_panel(&self, camera: &CameraState, width: usize, height: usize) -> MapPanel {
        let mut panel = MapPanel {
            width,
            height,
            center: camera.center(),
            zoom: camera.zoom(),
            popup: camera.open_marker().map(|marker| marker.popup.clone()),
            ..MapPanel::default()
        };

        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(2);
        let Some(view) = viewport_bounds(camera, inner_width, inner_height) else {
            panel.hidden_markers = camera.markers().len();
            return panel;
        };

        let positions: HashMap<RecordKey, usize> = self
            .filtered
            .iter()
            .enumerate()
            .map(|(index, record)| (record.key(), index))
            .collect();
        let selected = self.selection.selected_key();

        for marker in camera.markers() {
            if !view.contains(marker.position) {
                panel.hidden_markers += 1;
                continue;
            }
            let is_selected = selected == Some(&marker.key);
            let glyph = if is_selected {
                '@'
            } else {
                positions
                    .get(&marker.key)
                    .and_then(|index| u32::try_from(index + 1).ok())
                    .and_then(|number| char::from_digit(number, 10))
                    .unwrap_or('o')
            };
            panel.pins.push(MapPin {
                column: 1 + scale(marker.position.lng - view.west, view.east - view.west, inner_width),
                row: 1 + scale(view.north - marker.position.lat, view.north - view.south, inner_height),
                glyph,
                is_selected,
            });
        }

        panel.pins.sort_by_key(|pin| pin.is_selected);
        panel
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if let Some(message) = self.load_state.message() {
            return Some(StatusLine {
                message,
                is_error: self.load_state.is_error(),
            });
        }

        if self.suggestions_failed && !self.suggestion_query.trim().is_empty() {
            return Some(StatusLine {
                message: FETCH_FAILED_MESSAGE.to_string(),
                is_error: true,
            });
        }

        self.profile.as_ref().map(|profile| {
            let mut parts = vec![profile.display_name()];
            if let Some(npi) = profile.npi.as_deref().filter(|npi| !npi.is_empty()) {
                parts.push(format!("NPI {npi}"));
            }
            if !profile.specialties.is_empty() {
                parts.push(profile.specialties.join(", "));
            }
            if !profile.languages.is_empty() {
                parts.push(format!("speaks {}", profile.languages.join(", ")));
            }
            StatusLine {
                message: parts.join(" | "),
                is_error: false,
            }
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.view_mode {
            ViewMode::Map => {
                "name/city/state <text>: filter  accepting/inactive on|off  next/prev  pick <n>  table  quit"
            }
            ViewMode::Table => "scroll <n>: scroll  next/prev  pick <n>  map  clear  quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Visible geographic area of the panel.
///
/// A fitted viewport is the fitted box widened slightly; a flown-to viewport
/// spans what the zoom level would show in a panel of this size.
fn viewport_bounds(camera: &CameraState, width: usize, height: usize) -> Option<Bounds> {
    if width == 0 || height == 0 {
        return None;
    }

    if let Some(bounds) = camera.fitted_bounds() {
        let lng_pad = ((bounds.east - bounds.west) * 0.05).max(MIN_SPAN_DEGREES / 2.0);
        let lat_pad = ((bounds.north - bounds.south) * 0.05).max(MIN_SPAN_DEGREES / 2.0);
        return Some(Bounds {
            west: bounds.west - lng_pad,
            south: bounds.south - lat_pad,
            east: bounds.east + lng_pad,
            north: bounds.north + lat_pad,
        });
    }

    let center = camera.center()?;
    let zoom = camera.zoom().unwrap_or(DEFAULT_PANEL_ZOOM);
    let lng_span = 360.0 / 2f64.powf(zoom) * (width as f64 / CELLS_PER_TILE);
    let lat_span = lng_span * height as f64 * CELL_ASPECT / width as f64;
    Some(Bounds {
        west: center.lng - lng_span / 2.0,
        south: center.lat - lat_span / 2.0,
        east: center.lng + lng_span / 2.0,
        north: center.lat + lat_span / 2.0,
    })
}

/// Maps `offset` within `span` onto `0..cells`.
fn scale(offset: f64, span: f64, cells: usize) -> usize {
    if cells <= 1 || span <= 0.0 {
        return cells / 2;
    }
    let last = (cells - 1) as f64;
    ((offset / span) * last).round().clamp(0.0, last) as usize
}

/// Computes character index ranges to highlight for fuzzy match visualization.
///
/// Uses the Skim fuzzy matcher to find matching character positions, then
/// coalesces consecutive indices into `(start, end)` ranges (exclusive end).
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for idx in indices {
        run = match run {
            Some((start, prev)) if idx == prev + 1 => Some((start, idx)),
            Some((start, prev)) => {
                ranges.push((start, prev + 1));
                Some((idx, idx))
            }
            None => Some((idx, idx)),
        };
    }

    if let Some((start, prev)) = run {
        ranges.push((start, prev + 1));
    }
    ranges
}

/// Human-readable age of a roster: "just now", "5m ago", "3h ago", "2d ago".
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use provider_directory::app::state::freshness_label;
///
/// let now = Utc::now();
/// assert_eq!(freshness_label(now - Duration::seconds(20), now), "just now");
/// assert_eq!(freshness_label(now - Duration::minutes(5), now), "5m ago");
/// ```
#[must_use]
pub fn freshness_label(loaded_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(loaded_at);
    if age.num_minutes() < 1 {
        "just now".to_string()
    } else if age.num_hours() < 1 {
        format!("{}m ago", age.num_minutes())
    } else if age.num_days() < 1 {
        format!("{}h ago", age.num_hours())
    } else {
        format!("{}d ago", age.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SuggestionKind;
    use crate::map::{MapCommand, MapSurface};

    fn record(id: &str, name: &str, lat: Option<f64>, lng: Option<f64>) -> LocationRecord {
        LocationRecord {
            practitioner_id: id.into(),
            practice_location_id: format!("{id}0").into(),
            full_name: Some(name.into()),
            city: Some("Boston".into()),
            latitude: lat,
            longitude: lng,
            ..Default::default()
        }
    }

    fn state_with(records: Vec<LocationRecord>) -> AppState {
        let mut state = AppState::new(AppSettings::default(), Theme::default());
        state.replace_records(records, Some("org-1".into()));
        state
    }

    fn camera_after(actions: &[Action]) -> CameraState {
        let mut camera = CameraState::new();
        for action in actions {
            if let Action::Map(command) = action {
                camera.apply(command);
            }
        }
        camera
    }

    #[test]
    fn loading_roster_selects_first_record_and_fits_map() {
        let mut state = AppState::new(AppSettings::default(), Theme::default());
        let actions = state.replace_records(
            vec![
                record("1", "Alice", Some(42.36), Some(-71.06)),
                record("2", "Bob", Some(42.35), Some(-71.05)),
            ],
            None,
        );

        assert_eq!(state.selection.selected_index(), Some(0));
        assert!(matches!(actions[0], Action::Map(MapCommand::ShowMarkers(ref markers)) if markers.len() == 2));
        assert!(matches!(actions[1], Action::Map(MapCommand::FitBounds { .. })));
        assert!(actions.contains(&Action::ScrollIntoView {
            index: 0,
            align: ScrollAlign::Nearest
        }));
        assert!(actions
            .iter()
            .any(|action| matches!(action, Action::Map(MapCommand::FlyTo { .. }))));
        assert_eq!(state.load_state, LoadState::Ready);
        assert!(state.loaded_at.is_some());
    }

    #[test]
    fn filtering_out_selection_clears_highlight_and_closes_popup() {
        let mut state = state_with(vec![
            record("1", "Alice", Some(42.36), Some(-71.06)),
            record("2", "Bob", Some(42.35), Some(-71.05)),
        ]);

        state.criteria.name = "bob".into();
        let actions = state.apply_filters();

        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.selection.selected_index(), None);
        assert!(actions.contains(&Action::Map(MapCommand::ClosePopup)));
        assert_eq!(state.table_rows.len(), 1);
    }

    #[test]
    fn viewmodel_header_counts_filtered_and_total() {
        let mut state = state_with(vec![
            record("1", "Alice", None, None),
            record("2", "Bob", None, None),
            record("3", "Carol", None, None),
        ]);
        state.organization_name = Some("Harbor Health".into());
        state.criteria.name = "o".into();
        state.apply_filters();

        let vm = state.compute_viewmodel(30, 120, &CameraState::new());
        assert_eq!(vm.header.title, " Harbor Health (2/3) ");
        assert_eq!(vm.header.freshness.as_deref(), Some("updated just now"));
    }

    #[test]
    fn viewmodel_shows_cards_for_visible_window() {
        let records = (1..=20)
            .map(|i| record(&i.to_string(), &format!("Doctor {i}"), None, None))
            .collect();
        let mut state = state_with(records);

        let vm = state.compute_viewmodel(24, 120, &CameraState::new());
        let BodyView::Map { cards, .. } = vm.body else {
            panic!("expected map body");
        };
        // 24 rows minus 7 rows of chrome leaves 17 body rows, four cards.
        assert_eq!(cards.cards.len(), 4);
        assert_eq!(cards.total, 20);
        assert!(cards.cards[0].is_selected);
        assert!(!cards.cards[0].on_map);
    }

    #[test]
    fn scroll_into_view_uses_last_viewport() {
        let records = (1..=20)
            .map(|i| record(&i.to_string(), &format!("Doctor {i}"), None, None))
            .collect();
        let mut state = state_with(records);
        state.compute_viewmodel(24, 120, &CameraState::new());

        state.scroll_into_view(10, ScrollAlign::Nearest);
        assert_eq!(state.list_scroll, 7);

        state.scroll_into_view(12, ScrollAlign::Center);
        assert_eq!(state.list_scroll, 10);
    }

    #[test]
    fn filtered_to_nothing_shows_empty_state() {
        let mut state = state_with(vec![record("1", "Alice", None, None)]);
        state.criteria.city = "chicago".into();
        state.apply_filters();

        let vm = state.compute_viewmodel(24, 80, &CameraState::new());
        let BodyView::Empty(empty) = vm.body else {
            panic!("expected empty body");
        };
        assert_eq!(empty.message, "No providers match these filters");
    }

    #[test]
    fn table_mode_uses_roster_columns() {
        let mut state = state_with(vec![LocationRecord {
            accept_new_patients: PatientAcceptance::NotAccepting,
            office_phone_number: Some("555-0100".into()),
            office_phone_extension: Some("7".into()),
            ..record("1", "Alice", Some(42.36), Some(-71.06))
        }]);
        state.view_mode = ViewMode::Table;

        let vm = state.compute_viewmodel(24, 120, &CameraState::new());
        let BodyView::Table {
            grid: table::TableViewModel::Grid(grid),
            selected,
        } = vm.body
        else {
            panic!("expected table body");
        };

        let labels: Vec<&str> = grid.header.iter().map(|cell| cell.label.as_str()).collect();
        assert_eq!(labels[0], "Provider");
        assert!(!labels.contains(&"Latitude"));
        let phone = labels.iter().position(|label| *label == "Phone").unwrap();
        let accepting = labels.iter().position(|label| *label == "Accepting").unwrap();
        assert_eq!(grid.rows[0].cells[phone], "555-0100 x7");
        assert_eq!(grid.rows[0].cells[accepting], "No");
        assert_eq!(selected, Some(0));
    }

    #[test]
    fn map_panel_places_selected_pin_last() {
        let mut state = AppState::new(AppSettings::default(), Theme::default());
        let actions = state.replace_records(
            vec![
                record("1", "Alice", Some(42.0), Some(-71.0)),
                record("2", "Bob", Some(43.0), Some(-72.0)),
            ],
            None,
        );
        let mut camera = camera_after(&actions);
        camera.apply(&state.map_view.fit(&state.filtered).unwrap());

        let vm = state.compute_viewmodel(30, 100, &camera);
        let BodyView::Map { panel, .. } = vm.body else {
            panic!("expected map body");
        };
        assert_eq!(panel.pins.len(), 2);
        assert_eq!(panel.hidden_markers, 0);
        assert_eq!(panel.pins[0].glyph, '2');
        assert_eq!(panel.pins[1].glyph, '@');
        // Bob is further north-west: top-left of the panel.
        assert!(panel.pins[0].row < panel.pins[1].row);
        assert!(panel.pins[0].column < panel.pins[1].column);
    }

    #[test]
    fn suggestions_are_ranked_and_highlighted() {
        let suggestions = vec![
            Suggestion {
                id: None,
                name: "General Practice".into(),
                kind: SuggestionKind::Specialty,
                detail: None,
            },
            Suggestion {
                id: None,
                name: "Cardiology".into(),
                kind: SuggestionKind::Specialty,
                detail: None,
            },
        ];
        let ranked = AppState::rank_suggestions("card", suggestions);
        assert_eq!(ranked[0].name, "Cardiology");

        let mut state = AppState::new(AppSettings::default(), Theme::default());
        state.suggestion_query = "card".into();
        state.suggestions = ranked;
        let vm = state.compute_viewmodel(24, 80, &CameraState::new());
        assert_eq!(vm.suggestions[0].highlight_ranges, vec![(0, 4)]);
        assert_eq!(vm.suggestions[0].kind, "specialty");
    }

    #[test]
    fn highlight_ranges_coalesce_runs() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("abcdef", "abd", &matcher), vec![(0, 2), (3, 4)]);
        assert!(compute_highlight_ranges("abc", "xyz", &matcher).is_empty());
    }

    #[test]
    fn freshness_label_buckets() {
        let now = Utc::now();
        assert_eq!(freshness_label(now, now), "just now");
        assert_eq!(freshness_label(now - chrono::Duration::minutes(59), now), "59m ago");
        assert_eq!(freshness_label(now - chrono::Duration::hours(3), now), "3h ago");
        assert_eq!(freshness_label(now - chrono::Duration::days(2), now), "2d ago");
    }

    #[test]
    fn state_hint_comes_from_known_states() {
        let mut state = AppState::new(AppSettings::default(), Theme::default());
        state.states = vec![StateOption {
            code: "MA".into(),
            name: "Massachusetts".into(),
        }];
        state.criteria.state = "ma".into();

        let vm = state.compute_viewmodel(24, 80, &CameraState::new());
        assert_eq!(vm.filter_bar.state_hint.as_deref(), Some("Massachusetts"));
        assert_eq!(vm.filter_bar.chips.len(), 5);
    }
}
