//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the terminal host (main.rs) and the domain, filter,
//! map and table layers. It implements the event-driven architecture that
//! keeps the card list, the map and the table in sync.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Commands / Timers → Events → Event Handler → State Mutations → Actions → Side Effects
//!                        ↑                                                    ↓
//!                        └──────────────── Fetch results ─────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`commands`]: Parsing of the host's text commands into events
//! - [`debounce`]: Generation-token debouncing for text inputs
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View mode and roster load state
//! - [`requests`]: Request tokens that discard stale fetch results
//! - [`selection`]: The selection shared by the list and the map
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use provider_directory::app::{handle_event, AppSettings, AppState, Event};
//! use provider_directory::ui::theme::Theme;
//!
//! let mut state = AppState::new(AppSettings::default(), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Started)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), provider_directory::domain::DirectoryError>(())
//! ```

pub mod actions;
pub mod commands;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod requests;
pub mod selection;
pub mod state;

pub use actions::{Action, ApiRequest};
pub use handler::{handle_event, Event};
pub use modes::{LoadState, ViewMode};
pub use selection::{SelectionChange, SelectionCoordinator};
pub use state::{AppSettings, AppState};
