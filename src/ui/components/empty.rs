//! Empty state component.

use crate::ui::helpers::{position_cursor, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Writes `text` centered on `row`, padded to the full width.
fn centered_line(frame: &mut Frame, row: usize, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(frame, row, 1);
    frame.pad(padding);
    frame.push(&text);
    frame.pad(cols.saturating_sub(padding + len));
}

/// Renders the message and its subtitle centered in the body area.
pub fn render_empty_state(frame: &mut Frame, top: usize, height: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message_row = top + height.saturating_sub(2) / 2;

    frame.push(&Theme::fg(&theme.colors.empty_state_fg));
    centered_line(frame, message_row, &empty.message, cols);
    frame.push(Theme::reset());

    frame.push(Theme::dim());
    frame.push(&Theme::fg(&theme.colors.text_dim));
    centered_line(frame, message_row + 1, &empty.subtitle, cols);
    frame.push(Theme::reset());
}

/// Renders the table's single-line placeholder centered in the body area.
pub fn render_table_placeholder(frame: &mut Frame, top: usize, height: usize, message: &str, theme: &Theme, cols: usize) {
    frame.push(&Theme::fg(&theme.colors.empty_state_fg));
    centered_line(frame, top + height / 2, message, cols);
    frame.push(Theme::reset());
}
