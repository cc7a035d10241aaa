//! Card list component shown beside the map panel.

use crate::app::state::CARD_HEIGHT;
use crate::domain::PatientAcceptance;
use crate::ui::helpers::{fit, position_cursor, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, CardList};

/// Renders the visible cards, [`CARD_HEIGHT`] rows each.
///
/// Each card shows its number and title, the address, the phone and a status
/// line. The last row is a blank separator. Rows the cards do not fill are
/// cleared so stale content from a previous frame never shows through.
pub fn render_cards(frame: &mut Frame, row: usize, body_rows: usize, list: &CardList, theme: &Theme, width: usize) {
    let mut used_rows = 0;
    for card in &list.cards {
        if used_rows + CARD_HEIGHT > body_rows.max(CARD_HEIGHT) {
            break;
        }
        render_card(frame, row + used_rows, card, theme, width);
        used_rows += CARD_HEIGHT;
    }

    for offset in used_rows..body_rows {
        position_cursor(frame, row + offset, 1);
        frame.pad(width);
    }

    if list.total > list.cards.len() && body_rows > 0 {
        let last = list.first_index + list.cards.len();
        let indicator = format!(" {}-{} of {} ", list.first_index + 1, last, list.total);
        position_cursor(frame, row + body_rows - 1, 1);
        frame.push(&Theme::fg(&theme.colors.text_dim));
        frame.push(&fit(&indicator, width));
        frame.push(Theme::reset());
    }
}

fn render_card(frame: &mut Frame, row: usize, card: &CardItem, theme: &Theme, width: usize) {
    let line_style = |frame: &mut Frame, color: &str| {
        if card.is_selected {
            frame.push(&Theme::fg(&theme.colors.selection_fg));
            frame.push(&Theme::bg(&theme.colors.selection_bg));
        } else {
            frame.push(&Theme::fg(color));
        }
    };

    let marker = if card.is_selected { '>' } else { ' ' };
    let pin = if card.on_map { "" } else { " (no map location)" };

    position_cursor(frame, row, 1);
    line_style(frame, &theme.colors.text_normal);
    frame.push(Theme::bold());
    frame.push(&fit(&format!("{marker}{}. {}{pin}", card.index + 1, card.title), width));
    frame.push(Theme::reset());

    position_cursor(frame, row + 1, 1);
    line_style(frame, &theme.colors.text_dim);
    frame.push(&fit(&format!("   {}", card.address), width));
    frame.push(Theme::reset());

    position_cursor(frame, row + 2, 1);
    let badge_color = match card.acceptance {
        PatientAcceptance::Accepting => &theme.colors.accepting_fg,
        _ => &theme.colors.text_dim,
    };
    line_style(frame, badge_color);
    // Narrow lists truncate from the right; the badge goes first.
    let mut status = String::from("   ");
    if card.inactive {
        status.push_str("[inactive] ");
    }
    status.push_str(card.acceptance.label());
    if let Some(phone) = &card.phone {
        status.push_str("  ");
        status.push_str(phone);
    }
    frame.push(&fit(&status, width));
    frame.push(Theme::reset());

    position_cursor(frame, row + 3, 1);
    frame.pad(width);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(index: usize, selected: bool) -> CardItem {
        CardItem {
            index,
            title: format!("Provider {index}"),
            address: "1 Main St, Boston, MA 02110".into(),
            phone: None,
            acceptance: PatientAcceptance::NotAccepting,
            inactive: index % 2 == 1,
            is_selected: selected,
            on_map: index != 3,
        }
    }

    #[test]
    fn cards_show_status_and_range_indicator() {
        let list = CardList {
            cards: vec![card(2, false), card(3, true)],
            first_index: 2,
            total: 10,
        };
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_cards(&mut frame, 6, 12, &list, &theme, 40);

        let text = frame.plain_text();
        assert!(text.contains(" 3. Provider 2"));
        assert!(text.contains(">4. Provider 3 (no map location)"));
        assert!(text.contains("[inactive] Not accepting new patients"));
        assert!(text.contains("3-4 of 10"));
        assert!(frame.as_str().contains(&Theme::bg(&theme.colors.selection_bg)));
    }

    #[test]
    fn cards_stop_at_the_body_height() {
        let list = CardList {
            cards: (0..5).map(|i| card(i, false)).collect(),
            first_index: 0,
            total: 5,
        };
        let mut frame = Frame::new();
        render_cards(&mut frame, 1, 8, &list, &Theme::default(), 40);

        let text = frame.plain_text();
        assert!(text.contains("2. Provider 1"));
        assert!(!text.contains("3. Provider 2"));
    }

    #[test]
    fn inactive_badge_survives_the_narrowest_list() {
        let mut inactive = card(1, false);
        inactive.phone = Some("555-0100".into());
        let list = CardList {
            cards: vec![inactive],
            first_index: 0,
            total: 1,
        };
        let mut frame = Frame::new();
        render_cards(&mut frame, 1, 4, &list, &Theme::default(), 32);

        let text = frame.plain_text();
        assert!(text.contains("   [inactive] Not accepting"));
    }
}
