//! Suggestion list component.

use crate::ui::helpers::{position_cursor, render_highlighted_text, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SuggestionItem;

/// Renders one line per suggestion: kind badge, highlighted name, dimmed detail.
///
/// # Returns
///
/// The next available row position (row + number of suggestions)
pub fn render_suggestions(frame: &mut Frame, row: usize, items: &[SuggestionItem], theme: &Theme, cols: usize) -> usize {
    for (offset, item) in items.iter().enumerate() {
        position_cursor(frame, row + offset, 1);

        let badge = format!(" {:<10} ", item.kind);
        let badge_len = badge.chars().count().min(cols);
        frame.push(&Theme::fg(&theme.colors.text_dim));
        frame.push(&truncate(&badge, cols));
        frame.push(Theme::reset());

        let name_width = cols.saturating_sub(badge_len);
        let name = truncate(&item.name, name_width);
        let name_len = name.chars().count();
        let ranges: Vec<(usize, usize)> = item
            .highlight_ranges
            .iter()
            .filter(|(start, _)| *start < name_len)
            .map(|&(start, end)| (start, end.min(name_len)))
            .collect();
        frame.push(&Theme::fg(&theme.colors.text_normal));
        render_highlighted_text(frame, &name, &ranges, theme, false);
        frame.push(Theme::reset());

        let mut used = badge_len + name_len;
        if let Some(detail) = &item.detail {
            let detail = truncate(&format!("  {detail}"), cols.saturating_sub(used));
            frame.push(&Theme::fg(&theme.colors.text_dim));
            frame.push(&detail);
            frame.push(Theme::reset());
            used += detail.chars().count();
        }
        frame.pad(cols.saturating_sub(used));
    }
    row + items.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_per_suggestion() {
        let items = vec![
            SuggestionItem {
                name: "Cardiology".into(),
                kind: "Specialty",
                detail: None,
                highlight_ranges: vec![(0, 4)],
            },
            SuggestionItem {
                name: "Carla Diaz".into(),
                kind: "Provider",
                detail: Some("Boston, MA".into()),
                highlight_ranges: vec![(0, 3)],
            },
        ];
        let theme = Theme::default();
        let mut frame = Frame::new();
        let next = render_suggestions(&mut frame, 5, &items, &theme, 60);

        assert_eq!(next, 7);
        let text = frame.plain_text();
        assert!(text.contains("Specialty"));
        assert!(text.contains("Carla Diaz  Boston, MA"));
        assert_eq!(frame.as_str().matches(&Theme::bg(&theme.colors.match_highlight_bg)).count(), 2);
    }

    #[test]
    fn no_suggestions_take_no_rows() {
        let mut frame = Frame::new();
        assert_eq!(render_suggestions(&mut frame, 5, &[], &Theme::default(), 60), 5);
        assert!(frame.as_str().is_empty());
    }
}
