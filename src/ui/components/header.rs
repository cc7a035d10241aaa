//! Header component: organization title and roster freshness.

use crate::ui::helpers::{position_cursor, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title centered and bold, with the freshness label dimmed at
/// the right edge when there is room for both.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    let freshness = header
        .freshness
        .as_deref()
        .map(|label| format!("{label} "))
        .filter(|label| padding + title_len + label.chars().count() < cols);
    let freshness_len = freshness.as_deref().map_or(0, |label| label.chars().count());

    position_cursor(frame, row, 1);
    frame.push(Theme::bold());
    frame.push(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        frame.push(&Theme::bg(bg));
    }

    frame.pad(padding);
    frame.push(&title);
    frame.pad(cols.saturating_sub(padding + title_len + freshness_len));

    if let Some(label) = freshness {
        frame.push(Theme::reset());
        if let Some(bg) = &theme.colors.header_bg {
            frame.push(&Theme::bg(bg));
        }
        frame.push(&Theme::fg(&theme.colors.text_dim));
        frame.push(&label);
    }

    frame.push(Theme::reset());
    row + 1
}
