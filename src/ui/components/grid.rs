//! Table grid component.

use crate::table::GridView;
use crate::ui::helpers::{fit, position_cursor, truncate, Frame};
use crate::ui::theme::Theme;

/// Pixels per terminal cell when converting configured column widths.
const PX_PER_CELL: u16 = 8;
/// Narrowest column drawn, in cells.
const MIN_CELLS: usize = 4;

fn cell_width(px: u16) -> usize {
    usize::from(px / PX_PER_CELL).max(MIN_CELLS)
}

/// Pads or cuts `text` to `width`, right-aligning numeric cells.
fn align(text: &str, width: usize, numeric: bool) -> String {
    if numeric {
        let text = truncate(text, width);
        format!("{text:>width$}")
    } else {
        fit(text, width)
    }
}

/// Joins aligned cells into one line of exactly `cols` characters.
fn grid_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], numeric: &[bool], cols: usize) -> String {
    let joined = cells
        .zip(widths.iter().zip(numeric))
        .map(|(text, (&width, &numeric))| align(text, width, numeric))
        .collect::<Vec<_>>()
        .join(" ");
    fit(&format!(" {joined}"), cols)
}

/// Renders the header row and the rows inside the viewport.
///
/// The view carries overscan rows for smooth scrolling; only those between
/// `scroll_offset` and `scroll_offset + viewport_rows` are drawn. Columns that
/// do not fit in `cols` are cut at the right edge.
pub fn render_grid(frame: &mut Frame, row: usize, grid: &GridView, selected: Option<usize>, theme: &Theme, cols: usize) {
    let widths: Vec<usize> = grid.header.iter().map(|cell| cell_width(cell.width)).collect();
    let numeric: Vec<bool> = grid.header.iter().map(|cell| cell.numeric).collect();

    position_cursor(frame, row, 1);
    frame.push(Theme::bold());
    frame.push(&Theme::fg(&theme.colors.filter_border));
    frame.push(&grid_line(grid.header.iter().map(|cell| cell.label.as_str()), &widths, &numeric, cols));
    frame.push(Theme::reset());

    let visible = grid.scroll_offset..grid.scroll_offset + grid.viewport_rows;
    let mut drawn = 0;
    for grid_row in grid.rows.iter().filter(|grid_row| visible.contains(&grid_row.index)) {
        position_cursor(frame, row + 1 + drawn, 1);
        if selected == Some(grid_row.index) {
            frame.push(&Theme::fg(&theme.colors.selection_fg));
            frame.push(&Theme::bg(&theme.colors.selection_bg));
        } else {
            frame.push(&Theme::fg(&theme.colors.text_normal));
        }
        frame.push(&grid_line(grid_row.cells.iter().map(String::as_str), &widths, &numeric, cols));
        frame.push(Theme::reset());
        drawn += 1;
    }

    for offset in drawn..grid.viewport_rows {
        position_cursor(frame, row + 1 + offset, 1);
        frame.pad(cols);
    }

    if grid.total_rows > grid.viewport_rows {
        let last = (grid.scroll_offset + grid.viewport_rows).min(grid.total_rows);
        let indicator = format!(" rows {}-{} of {} ", grid.scroll_offset + 1, last, grid.total_rows);
        let len = indicator.chars().count();
        if len < cols {
            position_cursor(frame, row, cols - len + 1);
            frame.push(&Theme::fg(&theme.colors.text_dim));
            frame.push(&indicator);
            frame.push(Theme::reset());
        }
    }
}
