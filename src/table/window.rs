//! Windowing arithmetic shared by the virtualized table and the card list.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::str::FromStr;

/// Where a row lands when it is scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAlign {
    /// Scroll as little as possible; no-op if the row is already visible.
    #[default]
    Nearest,
    /// Put the row in the middle of the viewport.
    Center,
}

impl FromStr for ScrollAlign {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "center" => Ok(Self::Center),
            other => Err(format!("unknown scroll alignment '{other}'")),
        }
    }
}

/// Largest valid scroll offset.
#[must_use]
pub const fn max_scroll(total: usize, viewport_rows: usize) -> usize {
    total.saturating_sub(viewport_rows)
}

/// Clamps `scroll_offset` to the scrollable range.
#[must_use]
pub fn clamp_scroll(total: usize, scroll_offset: usize, viewport_rows: usize) -> usize {
    scroll_offset.min(max_scroll(total, viewport_rows))
}

/// Rows to materialize: the viewport plus `overscan` rows on each side.
///
/// # Examples
///
/// ```
/// use provider_directory::table::window::visible_range;
///
/// assert_eq!(visible_range(1000, 100, 20, 5), 95..125);
/// assert_eq!(visible_range(10, 0, 20, 5), 0..10);
/// assert_eq!(visible_range(0, 0, 20, 5), 0..0);
/// ```
#[must_use]
pub fn visible_range(total: usize, scroll_offset: usize, viewport_rows: usize, overscan: usize) -> Range<usize> {
    let scroll = clamp_scroll(total, scroll_offset, viewport_rows);
    let start = scroll.saturating_sub(overscan);
    let end = scroll
        .saturating_add(viewport_rows)
        .saturating_add(overscan)
        .min(total);
    start..end
}

/// Scroll offset that brings `index` into a viewport of `viewport_rows` rows.
#[must_use]
pub fn scroll_offset_for(index: usize, current: usize, viewport_rows: usize, align: ScrollAlign) -> usize {
    if viewport_rows == 0 {
        return index;
    }
    match align {
        ScrollAlign::Nearest if index < current => index,
        ScrollAlign::Nearest if index >= current + viewport_rows => index + 1 - viewport_rows,
        ScrollAlign::Nearest => current,
        ScrollAlign::Center => index.saturating_sub(viewport_rows / 2),
    }
}
