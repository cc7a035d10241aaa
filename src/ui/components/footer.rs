//! Footer component: status line and command help.

use crate::ui::helpers::{position_cursor, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, StatusLine};

/// Renders the command help centered and dimmed.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(frame, row, 1);
    frame.push(&Theme::fg(&theme.colors.text_dim));
    frame.pad(padding);
    frame.push(&help_text);
    frame.pad(cols.saturating_sub(padding + text_len));
    frame.push(Theme::reset());
    row + 1
}

/// Renders the load / profile status line, or clears the row when there is none.
pub fn render_status(frame: &mut Frame, row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(frame, row, 1);
    let Some(status) = status else {
        frame.pad(cols);
        return row + 1;
    };

    let color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.text_dim
    };
    let message = truncate(&format!(" {}", status.message), cols);

    frame.push(&Theme::fg(color));
    frame.push(&message);
    frame.pad(cols.saturating_sub(message.chars().count()));
    frame.push(Theme::reset());
    row + 1
}
