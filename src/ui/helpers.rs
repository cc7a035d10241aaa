//! Shared rendering utilities and helpers.
//!
//! This module provides the frame buffer components draw into and the text
//! utilities they share: cursor positioning, width-aware truncation and
//! fuzzy match highlighting with proper ANSI escape sequence management.
//!
//! # Features
//!
//! - **Frame Buffer**: Components append escape sequences and text to a
//!   [`Frame`]; the host writes the finished frame to the terminal in one go
//! - **Fuzzy Match Highlighting**: Renders text with highlighted character ranges
//! - **UTF-8 Safe**: Operates on character indices, not byte indices
//!
//! # Example
//!
//! ```rust
//! use provider_directory::ui::helpers::{render_highlighted_text, Frame};
//! use provider_directory::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut frame = Frame::new();
//! render_highlighted_text(&mut frame, "Cardiology", &[(0, 4)], &theme, false);
//! assert_eq!(frame.plain_text(), "Cardiology");
//! ```

use crate::ui::theme::Theme;

/// Output buffer for one rendered frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    buffer: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw text or escape sequences.
    pub fn push(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Appends `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.buffer.extend(std::iter::repeat(' ').take(count));
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// The frame with every escape sequence removed.
    #[must_use]
    pub fn plain_text(&self) -> String {
        strip_ansi(&self.buffer)
    }
}

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
///
/// # Example
///
/// ```rust
/// use provider_directory::ui::helpers::{position_cursor, Frame};
///
/// let mut frame = Frame::new();
/// position_cursor(&mut frame, 5, 1);
/// assert_eq!(frame.as_str(), "\u{1b}[5;1H");
/// ```
pub fn position_cursor(frame: &mut Frame, row: usize, col: usize) {
    frame.push(&format!("\u{1b}[{row};{col}H"));
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
///
/// # Example
///
/// ```rust
/// use provider_directory::ui::helpers::truncate;
///
/// assert_eq!(truncate("Massachusetts", 8), "Massa...");
/// assert_eq!(truncate("MA", 8), "MA");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let truncated = truncate(text, width);
    let len = truncated.chars().count();
    format!("{truncated}{}", " ".repeat(width.saturating_sub(len)))
}

/// Removes CSI escape sequences (`ESC [ ... letter`).
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Splits the text into highlighted and normal sections based on the provided
/// character ranges. When `is_selected` is `true`, match highlighting is
/// disabled to avoid conflicting with selection background colors.
///
/// # Parameters
///
/// * `frame` - Output buffer
/// * `text` - The text to render
/// * `ranges` - Character index ranges to highlight `(start, end)` (inclusive start, exclusive end)
/// * `theme` - Active color theme for highlight colors
/// * `is_selected` - Whether the item is currently selected
///
/// # Character Indices
///
/// Ranges use character indices (not byte indices); out-of-range or
/// overlapping ranges are clamped.
pub fn render_highlighted_text(frame: &mut Frame, text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        frame.push(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            frame.push(&normal_section);
        }

        frame.push(&Theme::fg(&theme.colors.match_highlight_fg));
        frame.push(&Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        frame.push(&highlighted_section);
        frame.push(Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        frame.push(&remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlighted_text_wraps_ranges_in_highlight_colors() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "abcdef", &[(0, 2), (4, 10)], &theme, false);

        let highlight = Theme::bg(&theme.colors.match_highlight_bg);
        assert_eq!(frame.as_str().matches(&highlight).count(), 2);
        assert_eq!(frame.plain_text(), "abcdef");
    }

    #[test]
    fn selected_text_is_not_highlighted() {
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "abc", &[(0, 1)], &Theme::default(), true);
        assert_eq!(frame.as_str(), "abc");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Zoë Müller-Lüdenscheidt", 10), "Zoë Mül...");
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(fit("ab", 4), "ab  ");
    }

    #[test]
    fn strip_ansi_removes_cursor_and_color_sequences() {
        let text = format!("\u{1b}[3;1H{}hi{}", Theme::fg("#ffffff"), Theme::reset());
        assert_eq!(strip_ansi(&text), "hi");
    }
}
