//! Nova REST API access.
//!
//! The directory core never talks HTTP itself: the host runs these calls and
//! feeds the results back as events.
//!
//! # Modules
//!
//! - [`client`]: `reqwest`-based client for the Nova endpoints
//! - [`types`]: Suggestion, state and profile wire types
//! - [`normalize`]: Record cleanup at the ingestion boundary
//! - [`roster_file`]: Offline roster snapshots

pub mod client;
pub mod normalize;
pub mod roster_file;
pub mod types;

pub use client::NovaClient;
pub use roster_file::{load_roster, save_roster, RosterSnapshot};
pub use types::{OrganizationSuggestion, PractitionerProfile, StateOption, Suggestion, SuggestionKind};
