//! Provider Directory: a filterable practitioner roster with a map and a table.
//!
//! The directory loads the practice locations of one healthcare organization
//! from the Nova REST API (or from a saved roster file) and keeps three views
//! of it in sync:
//! - A card list of the filtered records with a shared selection
//! - A map that shows one marker per located record and flies to the selection
//! - A virtualized table whose columns are derived from the data itself

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal host (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debouncing, request tokens       │
//! │  - Selection coordination                           │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Map / Table   │   │ API Layer     │
//! │ (ui/)         │   │ (map/ table/) │   │ (api/)        │
//! │ - Rendering   │   │ - Markers     │   │ - Nova client │
//! │ - Theming     │   │ - Camera      │   │ - Normalizing │
//! │ - Components  │   │ - Columns     │   │ - Roster files│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Filter & Infrastructure Layers             │
//! │  - Records, statuses, criteria (domain/)            │
//! │  - Filter engine (filter)                           │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Nova REST client, response normalization and roster files
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (records, statuses, criteria, errors)
//! - [`filter`]: Pure record filtering
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`map`]: Map view adapter and the headless camera
//! - [`table`]: Column derivation and row windowing
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! Settings are layered: built-in defaults, then `<config_dir>/config.toml`
//! (or `--config <file>`), then `--set key=value` overrides.
//!
//! ```toml
//! api_base_url = "https://nova.example.org/"
//! debounce_ms = 350
//! scroll_align = "center"
//! theme_name = "harbor-light"
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use provider_directory::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     debounce_ms: 300,
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_render, actions) = handle_event(&mut state, &Event::Started)?;
//! // Execute actions: here, fetch the state list.
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), provider_directory::DirectoryError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod map;
pub mod observability;
pub mod table;
pub mod ui;

pub use app::{handle_event, Action, AppSettings, AppState, Event, ViewMode};
pub use domain::{DirectoryError, FilterCriteria, LocationRecord, Result};
pub use table::ScrollAlign;
pub use ui::Theme;

use crate::app::debounce::{MAX_DEBOUNCE, MIN_DEBOUNCE};
use crate::map::MapSettings;
use crate::table::TableSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Application configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Nova REST API. Default: `http://localhost:8080/`
    pub api_base_url: String,

    /// Whole-request timeout. Default: 30
    pub request_timeout_secs: u64,

    /// Quiet period for text filters and suggestion queries, clamped to
    /// 300..=500 when applied. Default: 400
    pub debounce_ms: u64,

    /// Table rows materialized above and below the viewport. Default: 5
    pub overscan_rows: usize,

    /// Column width for columns without an override, in pixels. Default: 120
    pub default_column_width: u16,

    /// Zoom level when flying to a selected record. Default: 14
    pub fly_to_zoom: f64,

    /// Length of the fly-to animation. Default: 1500
    pub fly_to_duration_ms: u64,

    /// Delay before the selected record's popup opens. Default: 1600
    pub popup_delay_ms: u64,

    /// Padding around the fitted markers, in pixels. Default: 50
    pub fit_bounds_padding: u32,

    /// Where a selected row lands when scrolled into view. Default: `nearest`
    pub scroll_align: ScrollAlign,

    /// Built-in theme name (`harbor-dark`, `harbor-light`).
    ///
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/".to_string(),
            request_timeout_secs: 30,
            debounce_ms: 400,
            overscan_rows: 5,
            default_column_width: 120,
            fly_to_zoom: 14.0,
            fly_to_duration_ms: 1500,
            popup_delay_ms: 1600,
            fit_bounds_padding: 50,
            scroll_align: ScrollAlign::Nearest,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

/// Parses `value` into `target`, leaving `target` untouched if it does not parse.
fn override_parsed<T: FromStr>(target: &mut T, key: &str, value: &str) {
    match value.trim().parse() {
        Ok(parsed) => *target = parsed,
        Err(_) => tracing::warn!(key, value, "ignoring unparseable config value"),
    }
}

impl Config {
    /// Default configuration file location: `<config_dir>/config.toml`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        infrastructure::config_dir().join("config.toml")
    }

    /// Reads a TOML configuration file; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Io`] if the file cannot be read, or
    /// [`DirectoryError::Config`] if it is not valid TOML for this struct.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use provider_directory::Config;
    ///
    /// let config = Config::from_toml_file(Config::default_path())?;
    /// # Ok::<(), provider_directory::DirectoryError>(())
    /// ```
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| DirectoryError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses configuration from a `key=value` map on top of the defaults.
    ///
    /// # Parsing Rules
    ///
    /// - Numeric keys fall back to their default on parse errors
    /// - `scroll_align`: `nearest` or `center`
    /// - `theme` and `theme_name` are synonyms
    /// - Unknown keys are logged and ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use provider_directory::{Config, ScrollAlign};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "350".to_string());
    /// map.insert("scroll_align".to_string(), "center".to_string());
    /// map.insert("overscan_rows".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 350);
    /// assert_eq!(config.scroll_align, ScrollAlign::Center);
    /// assert_eq!(config.overscan_rows, 5);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies `key=value` overrides; a value that does not parse keeps the
    /// setting it would have replaced.
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        for (key, value) in map {
            let text = || Some(value.trim().to_string()).filter(|v| !v.is_empty());
            match key.as_str() {
                "api_base_url" | "api_url" => {
                    if let Some(url) = text() {
                        self.api_base_url = url;
                    }
                }
                "request_timeout_secs" => override_parsed(&mut self.request_timeout_secs, key, value),
                "debounce_ms" => override_parsed(&mut self.debounce_ms, key, value),
                "overscan_rows" => override_parsed(&mut self.overscan_rows, key, value),
                "default_column_width" => override_parsed(&mut self.default_column_width, key, value),
                "fly_to_zoom" => override_parsed(&mut self.fly_to_zoom, key, value),
                "fly_to_duration_ms" => override_parsed(&mut self.fly_to_duration_ms, key, value),
                "popup_delay_ms" => override_parsed(&mut self.popup_delay_ms, key, value),
                "fit_bounds_padding" => override_parsed(&mut self.fit_bounds_padding, key, value),
                "scroll_align" => override_parsed(&mut self.scroll_align, key, value),
                "theme" | "theme_name" => self.theme_name = text(),
                "theme_file" => self.theme_file = text(),
                "trace_level" => self.trace_level = text(),
                _ => tracing::warn!(key, "ignoring unknown config key"),
            }
        }
        self
    }

    /// Debounce delay clamped to the supported window.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms).clamp(MIN_DEBOUNCE, MAX_DEBOUNCE)
    }

    /// Application settings derived from this configuration.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        let popup_delay = Duration::from_millis(self.popup_delay_ms);
        let fly_duration = Duration::from_millis(self.fly_to_duration_ms);

        AppSettings {
            map: MapSettings {
                fly_to_zoom: self.fly_to_zoom,
                fly_duration,
                popup_delay: popup_delay.max(fly_duration + Duration::from_millis(100)),
                fit_padding: self.fit_bounds_padding,
                ..MapSettings::default()
            },
            table: app::state::roster_table_settings(TableSettings {
                default_width: self.default_column_width,
                overscan: self.overscan_rows,
                ..TableSettings::default()
            }),
            debounce: self.debounce(),
            scroll_align: self.scroll_align,
        }
    }

    /// Resolves the theme: file beats name beats default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Creates the application state for `config`.
///
/// Resolves the theme (file, then name, then default) and applies the map,
/// table, debounce and scroll settings. The roster starts empty; the host
/// loads one with an `org` command, `--org` or `--roster`.
///
/// # Example
///
/// ```rust
/// use provider_directory::{initialize, Config};
///
/// let config = Config {
///     theme_name: Some("harbor-light".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.theme.name, "harbor-light");
/// assert!(state.records.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_base_url = %config.api_base_url, "initializing provider directory");
    AppState::new(config.app_settings(), config.theme())
}
