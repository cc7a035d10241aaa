//! Composable UI component renderers.
//!
//! Each component draws one part of the screen into a [`Frame`] starting at a
//! given row and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Organization title and roster freshness
//! - [`filter_bar`]: Text filters, toggles and the state hint
//! - [`suggestions`]: Ranked search suggestions
//! - [`cards`]: Windowed card list beside the map
//! - [`map_panel`]: Text rendition of the map surface
//! - [`grid`]: Virtualized roster table
//! - [`empty`]: Centered empty state message
//! - [`footer`]: Status line and command help
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Filter chips]
//! [Toggles / state hint]
//! [Suggestions, 0-5 lines]
//! [Body: cards │ map panel, grid, or empty state]
//! [Status line]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod empty;
mod filter_bar;
mod footer;
mod grid;
mod header;
mod map_panel;
mod suggestions;

use crate::ui::helpers::{position_cursor, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

use cards::render_cards;
use empty::{render_empty_state, render_table_placeholder};
use filter_bar::render_filter_bar;
use footer::{render_footer, render_status};
use grid::render_grid;
use header::render_header;
use map_panel::render_map_panel;
use suggestions::render_suggestions;

/// Rows below the body: status line, border, footer.
const BOTTOM_ROWS: usize = 3;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(frame, row, 1);
    frame.push(&Theme::fg(color));
    frame.push(&"─".repeat(cols));
    frame.push(Theme::reset());
    row + 1
}

/// Renders a complete frame for `vm`.
///
/// # Line Accounting
///
/// Header and border take two rows, the filter bar two more, then one row per
/// suggestion. The status line, bottom border and footer take the last three
/// rows; the body fills everything in between.
pub fn render_layout(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 1;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    current_row = render_filter_bar(frame, current_row, &vm.filter_bar, theme, cols);
    current_row = render_suggestions(frame, current_row, &vm.suggestions, theme, cols);

    let body_rows = rows.saturating_sub(current_row - 1 + BOTTOM_ROWS).max(1);

    match &vm.body {
        BodyView::Empty(empty) => render_empty_state(frame, current_row, body_rows, empty, theme, cols),
        BodyView::Table { grid, selected } => match grid {
            crate::table::TableViewModel::Grid(view) => {
                render_grid(frame, current_row, view, *selected, theme, cols);
            }
            crate::table::TableViewModel::Empty { message, .. } => {
                render_table_placeholder(frame, current_row, body_rows, message, theme, cols);
            }
        },
        BodyView::Map { cards, panel } => {
            let list_width = cols.saturating_sub(panel.width + 1);
            render_cards(frame, current_row, body_rows, cards, theme, list_width);
            for offset in 0..body_rows {
                position_cursor(frame, current_row + offset, list_width + 1);
                frame.push(&Theme::fg(&theme.colors.border));
                frame.push("│");
                frame.push(Theme::reset());
            }
            render_map_panel(frame, current_row, list_width + 2, panel, theme);
        }
    }

    let status_row = rows.saturating_sub(BOTTOM_ROWS - 1).max(current_row + body_rows);
    render_status(frame, status_row, vm.status.as_ref(), theme, cols);
    render_border(frame, status_row + 1, &theme.colors.border, cols);
    render_footer(frame, status_row + 2, &vm.footer, theme, cols);
}
