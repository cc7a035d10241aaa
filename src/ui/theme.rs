//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the directory, supporting
//! built-in themes and custom themes loaded from TOML files. It provides
//! utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `harbor-dark`: Dark navy theme (default)
//! - `harbor-light`: Light theme for bright terminals
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6edf3"
//! selection_fg = "#0d1b2a"
//! selection_bg = "#7fb3d5"
//! text_normal = "#e6edf3"
//! text_dim = "#7d8b99"
//! border = "#2e4057"
//! filter_border = "#7fb3d5"
//! match_highlight_fg = "#0d1b2a"
//! match_highlight_bg = "#f4d35e"
//! empty_state_fg = "#7fb3d5"
//! accepting_fg = "#8bd17c"
//! inactive_fg = "#e5989b"
//! error_fg = "#ef6f6c"
//! map_bg = "#13263a"
//! marker_fg = "#f4d35e"
//! marker_selected_fg = "#ef6f6c"
//! ```
//!
//! # Example
//!
//! ```rust
//! use provider_directory::ui::theme::Theme;
//!
//! let theme = Theme::from_name("harbor-dark").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::{DirectoryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "harbor-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g., "#e6edf3"). Optional fields default to
/// `None`, allowing themes to opt out of certain styling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card / row foreground color.
    pub selection_fg: String,
    /// Selected card / row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, addresses, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Filter bar accent color.
    pub filter_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// "Accepting new patients" badge color.
    pub accepting_fg: String,
    /// Inactive record badge color.
    pub inactive_fg: String,
    /// Error status line color.
    pub error_fg: String,

    /// Optional map panel background.
    #[serde(default)]
    pub map_bg: Option<String>,
    /// Map pin color.
    pub marker_fg: String,
    /// Selected map pin color.
    pub marker_selected_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `harbor-dark`, `harbor-light`.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    ///
    /// # Example
    ///
    /// ```rust
    /// use provider_directory::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("harbor-light").unwrap();
    /// assert_eq!(theme.name, "harbor-light");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "harbor-dark" => include_str!("../../themes/harbor-dark.toml"),
            "harbor-light" => include_str!("../../themes/harbor-light.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::warn!(theme = name, error = %err, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Theme`] if:
    /// - The file cannot be read (file not found, permission denied, etc.)
    /// - The TOML content cannot be parsed (invalid syntax, missing fields, type mismatches)
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use provider_directory::ui::theme::Theme;
    ///
    /// let theme = Theme::from_file("/path/to/theme.toml")?;
    /// # Ok::<(), provider_directory::domain::DirectoryError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| DirectoryError::Theme(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| DirectoryError::Theme(format!("failed to parse theme TOML {}: {e}", path.display())))
    }

    /// Palette compiled into the binary, used if the default theme file is broken.
    fn fallback() -> Self {
        let color = |hex: &str| hex.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: color("#e6edf3"),
                header_bg: None,
                selection_fg: color("#0d1b2a"),
                selection_bg: color("#7fb3d5"),
                text_normal: color("#e6edf3"),
                text_dim: color("#7d8b99"),
                border: color("#2e4057"),
                filter_border: color("#7fb3d5"),
                match_highlight_fg: color("#0d1b2a"),
                match_highlight_bg: color("#f4d35e"),
                empty_state_fg: color("#7fb3d5"),
                accepting_fg: color("#8bd17c"),
                inactive_fg: color("#e5989b"),
                error_fg: color("#ef6f6c"),
                map_bg: None,
                marker_fg: color("#f4d35e"),
                marker_selected_fg: color("#ef6f6c"),
            },
        }
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Strips `#` prefix if present, validates length, and parses hex digits.
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use provider_directory::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    ///
    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Harbor Dark).
    ///
    /// # Example
    ///
    /// ```rust
    /// use provider_directory::ui::Theme;
    ///
    /// let theme = Theme::default();
    /// assert_eq!(theme.name, "harbor-dark");
    /// ```
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}
