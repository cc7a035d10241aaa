//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, timer
//! expirations and fetch results, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the terminal host (commands, timers, fetch results)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for the host to execute
//!
//! The handler never blocks: debouncing is expressed as timer tokens, and
//! every fetch carries a request token so late responses can be discarded.
//!
//! # Event Types
//!
//! - **Organization**: `OrganizationChosen`, `OrganizationChecked`, `RecordsLoaded`, `RecordsReplaced`
//! - **Filters**: `FilterTextChanged`, `AcceptingNewPatientsToggled`, `IncludeInactiveToggled`, `ClearFilters`
//! - **Selection**: `CardClicked`, `MarkerClicked`, `SelectNext`, `SelectPrevious`
//! - **Views**: `ShowMap`, `ShowTable`, `ScrollTable`
//! - **Lookups**: `SuggestionQueryChanged`, `SuggestionsLoaded`, `StatesLoaded`, `ProfileRequested`, `ProfileLoaded`
//! - **System**: `Started`, `TimerElapsed`, `FetchFailed`, `Quit`
//!
//! # Example
//!
//! ```rust
//! use provider_directory::app::{handle_event, AppSettings, AppState, Event};
//! use provider_directory::ui::theme::Theme;
//!
//! let mut state = AppState::new(AppSettings::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::SelectNext)?;
//! assert!(!render && actions.is_empty());
//! # Ok::<(), provider_directory::domain::DirectoryError>(())
//! ```

use super::actions::{Action, ApiRequest};
use super::debounce::{TimerLane, TimerToken};
use super::modes::{LoadState, ViewMode, FETCH_FAILED_MESSAGE};
use super::requests::{RequestKind, RequestToken};
use super::state::AppState;
use crate::api::{PractitionerProfile, StateOption, Suggestion};
use crate::domain::error::Result;
use crate::domain::{FilterCriteria, LocationRecord, RecordId, RecordKey, TextField};

/// Events triggered by user input, timers, or fetch results.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The host delivers them one at a time, so state
/// transitions are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The host is up; fetches reference data such as the state list.
    Started,

    /// The user picked an organization. Starts the existence check.
    OrganizationChosen {
        organization_id: RecordId,
        /// Display name, when the organization came from a suggestion.
        name: Option<String>,
    },

    /// Result of the existence check.
    OrganizationChecked {
        token: RequestToken,
        organization_id: RecordId,
        exists: bool,
    },

    /// Roster fetched for an organization.
    RecordsLoaded {
        token: RequestToken,
        organization_id: RecordId,
        records: Vec<LocationRecord>,
    },

    /// Roster supplied directly (snapshot file), bypassing the API.
    RecordsReplaced {
        records: Vec<LocationRecord>,
        organization_id: Option<RecordId>,
    },

    /// A fetch failed.
    FetchFailed {
        token: RequestToken,
        kind: RequestKind,
        message: String,
        /// The API reported the organization as unknown.
        not_found: bool,
    },

    /// A text filter was edited. Applied after the debounce window.
    FilterTextChanged { field: TextField, value: String },

    /// The accepting-new-patients checkbox changed. Applied immediately.
    AcceptingNewPatientsToggled(bool),

    /// The include-inactive checkbox changed. Applied immediately.
    IncludeInactiveToggled(bool),

    /// Resets every filter, discarding pending text edits.
    ClearFilters,

    /// A timer scheduled through [`Action::ScheduleTimer`] fired.
    TimerElapsed { token: TimerToken },

    /// A card in the list was clicked.
    CardClicked { key: RecordKey },

    /// A marker on the map was clicked.
    MarkerClicked { key: RecordKey },

    /// Moves the selection down, wrapping to the first record.
    SelectNext,

    /// Moves the selection up, wrapping to the last record.
    SelectPrevious,

    ShowMap,

    ShowTable,

    /// Scrolls the table by `delta` rows.
    ScrollTable { delta: isize },

    /// The search box text changed. Suggestions are fetched after the
    /// debounce window.
    SuggestionQueryChanged { query: String },

    SuggestionsLoaded {
        token: RequestToken,
        suggestions: Vec<Suggestion>,
    },

    StatesLoaded {
        token: RequestToken,
        states: Vec<StateOption>,
    },

    /// Fetches the profile of the selected practitioner.
    ProfileRequested,

    ProfileLoaded {
        token: RequestToken,
        profile: PractitionerProfile,
    },

    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the frame needs re-rendering, plus the actions to execute in
/// order. The action list is empty when the event requires no side effects
/// (stale response, nothing selected, state unchanged).
///
/// # Errors
///
/// Reserved for state transitions that cannot be completed; none of the
/// current events fail.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Started => {
            let mut actions = Vec::new();
            let token = start_request(state, RequestKind::States, &mut actions);
            actions.push(Action::Fetch(ApiRequest::States { token }));
            Ok((false, actions))
        }
        Event::OrganizationChosen { organization_id, name } => {
            tracing::debug!(organization = %organization_id, "organization chosen");

            let mut actions = Vec::new();
            if let Some(stale) = state.requests.cancel(RequestKind::Roster) {
                actions.push(Action::CancelRequest(stale));
            }
            let token = start_request(state, RequestKind::Exists, &mut actions);

            state.pending_organization = Some((organization_id.clone(), name.clone()));
            state.load_state = LoadState::Checking(organization_id.clone());
            actions.push(Action::Fetch(ApiRequest::OrganizationExists {
                token,
                organization_id: organization_id.clone(),
            }));
            Ok((true, actions))
        }
        Event::OrganizationChecked {
            token,
            organization_id,
            exists,
        } => {
            if !state.requests.complete(RequestKind::Exists, *token) {
                return Ok((false, vec![]));
            }

            if !exists {
                tracing::debug!(organization = %organization_id, "organization has no directory data");
                state.pending_organization = None;
                state.load_state = LoadState::NotFound(organization_id.clone());
                return Ok((true, vec![]));
            }

            let mut actions = Vec::new();
            let token = start_request(state, RequestKind::Roster, &mut actions);
            state.load_state = LoadState::Loading(organization_id.clone());
            actions.push(Action::Fetch(ApiRequest::Roster {
                token,
                organization_id: organization_id.clone(),
            }));
            Ok((true, actions))
        }
        Event::RecordsLoaded {
            token,
            organization_id,
            records,
        } => {
            if !state.requests.complete(RequestKind::Roster, *token) {
                return Ok((false, vec![]));
            }

            let name = state
                .pending_organization
                .take()
                .filter(|(pending, _)| pending == organization_id)
                .and_then(|(_, name)| name);

            if records.is_empty() {
                tracing::debug!(organization = %organization_id, "organization roster is empty");
                state.load_state = LoadState::NotFound(organization_id.clone());
                return Ok((true, vec![]));
            }

            tracing::debug!(organization = %organization_id, count = records.len(), "roster loaded");
            state.organization_name = name;
            let actions = state.replace_records(records.clone(), Some(organization_id.clone()));
            Ok((true, actions))
        }
        Event::RecordsReplaced {
            records,
            organization_id,
        } => {
            let mut actions: Vec<Action> = [RequestKind::Exists, RequestKind::Roster]
                .into_iter()
                .filter_map(|kind| state.requests.cancel(kind))
                .map(Action::CancelRequest)
                .collect();
            state.pending_organization = None;
            state.organization_name = None;
            actions.extend(state.replace_records(records.clone(), organization_id.clone()));
            Ok((true, actions))
        }
        Event::FetchFailed {
            token,
            kind,
            message,
            not_found,
        } => {
            if !state.requests.complete(*kind, *token) {
                return Ok((false, vec![]));
            }

            match kind {
                RequestKind::Exists | RequestKind::Roster => {
                    tracing::warn!(%token, ?kind, error = %message, "roster fetch failed");
                    let pending = state.pending_organization.take();
                    state.load_state = match (pending, *not_found) {
                        (Some((organization_id, _)), true) => LoadState::NotFound(organization_id),
                        _ => LoadState::Failed(FETCH_FAILED_MESSAGE.to_string()),
                    };
                    Ok((true, vec![]))
                }
                RequestKind::Suggestions => {
                    tracing::warn!(%token, error = %message, "suggestion fetch failed");
                    state.suggestions.clear();
                    state.suggestions_failed = true;
                    Ok((true, vec![]))
                }
                RequestKind::States => {
                    tracing::warn!(%token, error = %message, "state list fetch failed");
                    Ok((false, vec![]))
                }
                RequestKind::Profile => {
                    tracing::warn!(%token, error = %message, "profile fetch failed");
                    state.profile = None;
                    Ok((true, vec![]))
                }
            }
        }
        Event::FilterTextChanged { field, value } => {
            let snapshot = state.pending_criteria().clone().with_text(*field, value.clone());
            let token = state.filter_debounce.push(snapshot);
            tracing::trace!(?field, %token, "filter edit debounced");
            Ok((
                true,
                vec![Action::ScheduleTimer {
                    token,
                    delay: state.filter_debounce.delay(),
                }],
            ))
        }
        Event::AcceptingNewPatientsToggled(enabled) => {
            if state.criteria.accepting_new_patients == *enabled {
                return Ok((false, vec![]));
            }
            state.criteria.accepting_new_patients = *enabled;
            Ok((true, state.apply_filters()))
        }
        Event::IncludeInactiveToggled(enabled) => {
            if state.criteria.include_inactive == *enabled {
                return Ok((false, vec![]));
            }
            state.criteria.include_inactive = *enabled;
            Ok((true, state.apply_filters()))
        }
        Event::ClearFilters => {
            state.filter_debounce.cancel();
            state.criteria = FilterCriteria::default();
            Ok((true, state.apply_filters()))
        }
        Event::TimerElapsed { token } => match token.lane {
            TimerLane::Filters => {
                let Some(snapshot) = state.filter_debounce.fire(*token) else {
                    return Ok((false, vec![]));
                };
                // Toggles may have changed while the text edit was pending.
                state.criteria = FilterCriteria {
                    accepting_new_patients: state.criteria.accepting_new_patients,
                    include_inactive: state.criteria.include_inactive,
                    ..snapshot
                };
                Ok((true, state.apply_filters()))
            }
            TimerLane::Suggestions => {
                let Some(query) = state.suggestion_debounce.fire(*token) else {
                    return Ok((false, vec![]));
                };
                let mut actions = Vec::new();
                let token = start_request(state, RequestKind::Suggestions, &mut actions);
                actions.push(Action::Fetch(ApiRequest::Suggestions { token, query }));
                Ok((false, actions))
            }
        },
        Event::CardClicked { key } | Event::MarkerClicked { key } => {
            let actions = state.select_key(key.clone());
            Ok((true, actions))
        }
        Event::SelectNext => {
            let change = state.selection.select_next(&state.filtered);
            let actions = state.selection_actions(change);
            Ok((!actions.is_empty(), actions))
        }
        Event::SelectPrevious => {
            let change = state.selection.select_previous(&state.filtered);
            let actions = state.selection_actions(change);
            Ok((!actions.is_empty(), actions))
        }
        Event::ShowMap => {
            let changed = state.view_mode != ViewMode::Map;
            state.view_mode = ViewMode::Map;
            Ok((changed, vec![]))
        }
        Event::ShowTable => {
            let changed = state.view_mode != ViewMode::Table;
            state.view_mode = ViewMode::Table;
            Ok((changed, vec![]))
        }
        Event::ScrollTable { delta } => Ok((state.scroll_table(*delta), vec![])),
        Event::SuggestionQueryChanged { query } => {
            state.suggestion_query.clone_from(query);
            state.suggestions_failed = false;

            if query.trim().is_empty() {
                state.suggestion_debounce.cancel();
                state.suggestions.clear();
                let actions = state
                    .requests
                    .cancel(RequestKind::Suggestions)
                    .map(Action::CancelRequest)
                    .into_iter()
                    .collect();
                return Ok((true, actions));
            }

            let token = state.suggestion_debounce.push(query.trim().to_string());
            Ok((
                true,
                vec![Action::ScheduleTimer {
                    token,
                    delay: state.suggestion_debounce.delay(),
                }],
            ))
        }
        Event::SuggestionsLoaded { token, suggestions } => {
            if !state.requests.complete(RequestKind::Suggestions, *token) {
                return Ok((false, vec![]));
            }
            state.suggestions = AppState::rank_suggestions(&state.suggestion_query, suggestions.clone());
            state.suggestions_failed = false;
            tracing::debug!(count = state.suggestions.len(), "suggestions ranked");
            Ok((true, vec![]))
        }
        Event::StatesLoaded { token, states } => {
            if !state.requests.complete(RequestKind::States, *token) {
                return Ok((false, vec![]));
            }
            state.states.clone_from(states);
            Ok((true, vec![]))
        }
        Event::ProfileRequested => {
            let Some(practitioner_id) = state.selected_record().map(|record| record.practitioner_id.clone()) else {
                tracing::debug!("no practitioner selected");
                return Ok((false, vec![]));
            };

            let mut actions = Vec::new();
            let token = start_request(state, RequestKind::Profile, &mut actions);
            actions.push(Action::Fetch(ApiRequest::Profile { token, practitioner_id }));
            Ok((false, actions))
        }
        Event::ProfileLoaded { token, profile } => {
            if !state.requests.complete(RequestKind::Profile, *token) {
                return Ok((false, vec![]));
            }
            state.profile = Some(profile.clone());
            Ok((true, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

/// Issues a token for `kind`, queueing cancellation of the request it supersedes.
fn start_request(state: &mut AppState, kind: RequestKind, actions: &mut Vec<Action>) -> RequestToken {
    let (token, superseded) = state.requests.start(kind);
    if let Some(stale) = superseded {
        actions.push(Action::CancelRequest(stale));
    }
    token
}
