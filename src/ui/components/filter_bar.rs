//! Filter bar component: text filters on the first row, toggles on the second.

use crate::ui::helpers::{position_cursor, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Writes `text` unless it would overflow `cols`; returns the new used width.
fn push_clipped(frame: &mut Frame, used: usize, text: &str, cols: usize) -> usize {
    let len = text.chars().count();
    if used + len > cols {
        return used;
    }
    frame.push(text);
    used + len
}

/// Renders the filter chips and the toggle row.
///
/// Chips still inside their debounce window are drawn dimmed with a trailing
/// `…` so the user can tell the list has not caught up yet.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_filter_bar(frame: &mut Frame, row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(frame, row, 1);
    let mut used = 0;
    for chip in &bar.chips {
        frame.push(&Theme::fg(&theme.colors.filter_border));
        used = push_clipped(frame, used, &format!(" {}:", chip.label), cols);

        let value = if chip.value.is_empty() { "-" } else { chip.value.as_str() };
        if chip.pending {
            frame.push(Theme::dim());
            frame.push(&Theme::fg(&theme.colors.text_dim));
            used = push_clipped(frame, used, &format!("{value}…"), cols);
        } else {
            frame.push(&Theme::fg(&theme.colors.text_normal));
            used = push_clipped(frame, used, value, cols);
        }
        frame.push(Theme::reset());
    }
    frame.pad(cols.saturating_sub(used));

    position_cursor(frame, row + 1, 1);
    let mut used = 0;
    let toggles = [
        ("Accepting new patients", bar.accepting_new_patients, &theme.colors.accepting_fg),
        ("Include inactive", bar.include_inactive, &theme.colors.inactive_fg),
    ];
    for (label, enabled, color) in toggles {
        let mark = if enabled { "[x]" } else { "[ ]" };
        frame.push(&Theme::fg(if enabled { color } else { &theme.colors.text_dim }));
        used = push_clipped(frame, used, &format!(" {mark} {label}"), cols);
        frame.push(Theme::reset());
    }
    if let Some(hint) = &bar.state_hint {
        frame.push(&Theme::fg(&theme.colors.text_dim));
        used = push_clipped(frame, used, &format!("  State: {hint}"), cols);
        frame.push(Theme::reset());
    }
    frame.pad(cols.saturating_sub(used));

    row + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::FilterChip;

    #[test]
    fn pending_chips_are_marked() {
        let bar = FilterBarInfo {
            chips: vec![
                FilterChip {
                    label: "Name",
                    value: "ali".into(),
                    pending: true,
                },
                FilterChip {
                    label: "City",
                    value: String::new(),
                    pending: false,
                },
            ],
            accepting_new_patients: true,
            include_inactive: false,
            state_hint: Some("Massachusetts".into()),
        };
        let mut frame = Frame::new();
        let next = render_filter_bar(&mut frame, 3, &bar, &Theme::default(), 100);

        let text = frame.plain_text();
        assert_eq!(next, 5);
        assert!(text.contains("Name:ali…"));
        assert!(text.contains("City:-"));
        assert!(text.contains("[x] Accepting new patients"));
        assert!(text.contains("[ ] Include inactive"));
        assert!(text.contains("State: Massachusetts"));
    }

    #[test]
    fn narrow_terminals_drop_trailing_chips() {
        let bar = FilterBarInfo {
            chips: vec![FilterChip {
                label: "Specialty",
                value: "Cardiology".into(),
                pending: false,
            }],
            ..FilterBarInfo::default()
        };
        let mut frame = Frame::new();
        render_filter_bar(&mut frame, 1, &bar, &Theme::default(), 12);

        assert!(!frame.plain_text().contains("Cardiology"));
    }
}
