//! User interface rendering layer with component-based architecture.
//!
//! This module turns view models into ANSI-styled frames through composable
//! rendering components. It provides theme support, a responsive layout and
//! fuzzy match highlighting.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Frame buffer and shared rendering utilities
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust
//! use provider_directory::app::{AppSettings, AppState};
//! use provider_directory::map::CameraState;
//! use provider_directory::ui::{render, Theme};
//!
//! let mut state = AppState::new(AppSettings::default(), Theme::default());
//! let frame = render(&mut state, &CameraState::new(), 24, 80);
//! assert!(frame.contains("No providers loaded"));
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use helpers::Frame;
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BodyView, CardItem, CardList, EmptyState, FilterBarInfo, FilterChip, FooterInfo, HeaderInfo, MapPanel, MapPin,
    StatusLine, SuggestionItem, UIViewModel,
};
