//! Map panel component: a boxed text rendition of the map surface.

use crate::ui::helpers::{fit, position_cursor, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MapPanel;

/// Renders the panel box, its pins, the open popup and the camera summary.
///
/// Pin coordinates are relative to the panel's top-left border cell. The
/// summary sits in the bottom border; the popup overlays the top interior rows.
pub fn render_map_panel(frame: &mut Frame, row: usize, left: usize, panel: &MapPanel, theme: &Theme) {
    if panel.width < 3 || panel.height < 3 {
        return;
    }
    let inner_width = panel.width - 2;
    let inner_height = panel.height - 2;

    position_cursor(frame, row, left);
    frame.push(&Theme::fg(&theme.colors.border));
    frame.push("┌");
    frame.push(&horizontal_with_label(" Map ", inner_width));
    frame.push("┐");

    for offset in 1..=inner_height {
        position_cursor(frame, row + offset, left);
        frame.push(&Theme::fg(&theme.colors.border));
        frame.push("│");
        if let Some(bg) = &theme.colors.map_bg {
            frame.push(&Theme::bg(bg));
        }
        frame.pad(inner_width);
        frame.push(Theme::reset());
        frame.push(&Theme::fg(&theme.colors.border));
        frame.push("│");
    }

    position_cursor(frame, row + panel.height - 1, left);
    frame.push("└");
    frame.push(&horizontal_with_label(&summary(panel, inner_width.saturating_sub(1)), inner_width));
    frame.push("┘");
    frame.push(Theme::reset());

    for pin in &panel.pins {
        if pin.row == 0 || pin.row > inner_height || pin.column == 0 || pin.column > inner_width {
            continue;
        }
        position_cursor(frame, row + pin.row, left + pin.column);
        if let Some(bg) = &theme.colors.map_bg {
            frame.push(&Theme::bg(bg));
        }
        if pin.is_selected {
            frame.push(Theme::bold());
            frame.push(&Theme::fg(&theme.colors.marker_selected_fg));
        } else {
            frame.push(&Theme::fg(&theme.colors.marker_fg));
        }
        let mut glyph = [0u8; 4];
        frame.push(pin.glyph.encode_utf8(&mut glyph));
        frame.push(Theme::reset());
    }

    if let Some(popup) = &panel.popup {
        let mut lines = vec![popup.title.clone(), popup.address.clone()];
        if let Some(phone) = &popup.phone {
            lines.push(phone.clone());
        }
        for (offset, line) in lines.iter().take(inner_height).enumerate() {
            position_cursor(frame, row + 1 + offset, left + 1);
            frame.push(&Theme::fg(&theme.colors.selection_fg));
            frame.push(&Theme::bg(&theme.colors.selection_bg));
            if offset == 0 {
                frame.push(Theme::bold());
            }
            frame.push(&fit(&format!(" {line}"), inner_width));
            frame.push(Theme::reset());
        }
    }
}

/// Camera summary that fits in `width` border cells.
///
/// Parts are listed by priority (off-screen count, zoom, center) and the
/// lowest-priority parts are dropped until the label fits.
fn summary(panel: &MapPanel, width: usize) -> String {
    let mut parts = Vec::new();
    if panel.hidden_markers > 0 {
        parts.push(format!("{} off-screen", panel.hidden_markers));
    }
    if let Some(zoom) = panel.zoom {
        parts.push(format!("zoom {zoom:.0}"));
    }
    if let Some(center) = panel.center {
        parts.push(format!("{:.2}, {:.2}", center.lat, center.lng));
    }
    if parts.is_empty() {
        return String::new();
    }
    loop {
        let label = format!(" {} ", parts.join(" | "));
        if label.chars().count() <= width || parts.len() == 1 {
            return label;
        }
        parts.pop();
    }
}

/// A horizontal border line of `width` cells with `label` after the first cell.
fn horizontal_with_label(label: &str, width: usize) -> String {
    let label = truncate(label, width.saturating_sub(1));
    let label_len = label.chars().count();
    if label_len == 0 {
        return "─".repeat(width);
    }
    format!("─{label}{}", "─".repeat(width.saturating_sub(label_len + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LatLng;
    use crate::map::PopupContent;
    use crate::ui::viewmodel::MapPin;

    fn panel() -> MapPanel {
        MapPanel {
            width: 30,
            height: 8,
            pins: vec![
                MapPin {
                    column: 4,
                    row: 2,
                    glyph: '1',
                    is_selected: false,
                },
                MapPin {
                    column: 40,
                    row: 2,
                    glyph: '2',
                    is_selected: false,
                },
            ],
            center: Some(LatLng {
                lat: 42.3601,
                lng: -71.0589,
            }),
            zoom: Some(12.0),
            popup: None,
            hidden_markers: 3,
        }
    }

    #[test]
    fn pins_land_inside_the_box() {
        let mut frame = Frame::new();
        render_map_panel(&mut frame, 5, 41, &panel(), &Theme::default());

        let raw = frame.as_str();
        assert!(raw.contains("\u{1b}[7;45H"));
        assert!(!raw.contains("\u{1b}[7;81H"));
        let text = frame.plain_text();
        assert!(text.contains("┌─ Map ─"));
        assert!(text.contains("─ 3 off-screen | zoom 12 ─"));
        assert!(text.contains('1'));
    }

    #[test]
    fn summary_keeps_the_off_screen_count_when_narrow() {
        let mut wide = panel();
        wide.width = 60;
        assert_eq!(summary(&wide, 57), " 3 off-screen | zoom 12 | 42.36, -71.06 ");
        assert_eq!(summary(&panel(), 27), " 3 off-screen | zoom 12 ");
        assert_eq!(summary(&panel(), 10), " 3 off-screen ");

        let mut frame = Frame::new();
        render_map_panel(&mut frame, 1, 1, &wide, &Theme::default());
        assert!(frame.plain_text().contains("42.36, -71.06 ─"));
    }

    #[test]
    fn popup_overlays_the_top_rows() {
        let mut panel = panel();
        panel.popup = Some(PopupContent {
            title: "Alice Smith".into(),
            address: "1 Main St, Boston, MA 02110".into(),
            phone: Some("555-0100".into()),
        });
        let mut frame = Frame::new();
        render_map_panel(&mut frame, 1, 1, &panel, &Theme::default());

        let text = frame.plain_text();
        assert!(text.contains(" Alice Smith"));
        assert!(text.contains(" 555-0100"));
    }

    #[test]
    fn tiny_panels_draw_nothing() {
        let mut frame = Frame::new();
        render_map_panel(
            &mut frame,
            1,
            1,
            &MapPanel {
                width: 2,
                height: 2,
                ..MapPanel::default()
            },
            &Theme::default(),
        );
        assert!(frame.as_str().is_empty());
    }
}
