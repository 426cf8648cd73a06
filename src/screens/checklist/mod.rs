//! The checklist screen: master row, one header per section and the item
//! rows of every expanded section.

pub use types::*;

mod binding;
mod input;
mod navigation;
mod render;
pub mod types;

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    use super::*;
    use crate::config::ChecklistConfig;

    fn screen() -> ChecklistScreen {
        ChecklistScreen::new(ChecklistConfig::default().build().unwrap())
    }

    fn press(screen: &mut ChecklistScreen, key: KeyCode) -> ScreenAction {
        screen.handle_key(key, KeyModifiers::NONE)
    }

    fn click(screen: &mut ChecklistScreen, column: u16, row: u16) {
        screen.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn draw(screen: &mut ChecklistScreen, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                screen.render(f, area);
            })
            .unwrap();
        terminal
    }

    fn buffer_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn lists_master_headers_and_items() {
        let screen = screen();
        assert_eq!(screen.rows.len(), 1 + 2 * (1 + 8));
        assert_eq!(screen.rows[0].kind, RowKind::Master);
        assert_eq!(screen.rows[1].kind, RowKind::Section(0));
        assert_eq!(screen.rows[2].label, "A1");
        assert_eq!(screen.rows[10].kind, RowKind::Section(1));
        assert!(screen.rows[0].expand_button.is_none());
        assert!(screen.rows[1].expand_button.is_some());
    }

    #[test]
    fn space_on_master_selects_and_clears_everything() {
        let mut screen = screen();

        press(&mut screen, KeyCode::Char(' '));
        assert!(screen.model.is_all_selected());
        assert!(screen.rows.iter().all(RowBinding::is_checked));

        press(&mut screen, KeyCode::Enter);
        assert!(screen.rows.iter().all(|row| !row.is_checked()));
        assert_eq!(screen.status.status_message, "Cleared everything");
    }

    #[test]
    fn section_toggle_updates_header_and_master_bindings() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Char(' '));

        assert!(screen.rows[1].is_checked());
        assert!(!screen.rows[0].is_checked());
        assert!(screen.rows[2..10].iter().all(RowBinding::is_checked));
        assert!(!screen.rows[11].is_checked());

        let b_header = screen.position_of(RowKind::Section(1)).unwrap();
        screen.cursor = b_header;
        press(&mut screen, KeyCode::Char(' '));

        assert!(screen.rows[0].is_checked());
        assert_eq!(screen.status.selected(), 16);
    }

    #[test]
    fn unchecking_one_item_clears_section_and_master() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('a'));
        assert!(screen.rows[0].is_checked());

        screen.cursor = screen.position_of(RowKind::Item { section: 1, item: 4 }).unwrap();
        press(&mut screen, KeyCode::Char(' '));

        assert!(!screen.rows[screen.cursor].is_checked());
        assert!(!screen.rows[10].is_checked());
        assert!(screen.rows[1].is_checked());
        assert!(!screen.rows[0].is_checked());
        assert_eq!(screen.status.status_message, "B5 unselected");
    }

    #[test]
    fn collapsing_hides_items_and_releases_their_bindings() {
        let mut screen = screen();
        let a1 = screen.model.groups()[0].items()[0].clone();
        // section all_selected + selected_count, plus the row binding
        assert_eq!(a1.observe().listener_count(), 3);
        assert_eq!(screen.layout_subscription_count(), 2);

        screen.cursor = 1;
        press(&mut screen, KeyCode::Left);

        assert!(!screen.model.groups()[0].is_expanded());
        assert_eq!(screen.rows.len(), 1 + 1 + 1 + 8);
        assert_eq!(a1.observe().listener_count(), 2);
        assert!(screen.rows[1].is_collapsed());
        assert_eq!(screen.focused_kind(), Some(RowKind::Section(0)));

        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.rows.len(), 19);
        assert_eq!(a1.observe().listener_count(), 3);
        assert_eq!(screen.layout_subscription_count(), 2);
    }

    #[test]
    fn collapse_keeps_selection_and_moves_cursor_to_header() {
        let mut screen = screen();
        screen.cursor = screen.position_of(RowKind::Item { section: 0, item: 3 }).unwrap();
        press(&mut screen, KeyCode::Char(' '));

        press(&mut screen, KeyCode::Char('e'));

        assert_eq!(screen.focused_kind(), Some(RowKind::Section(0)));
        assert!(screen.model.groups()[0].items()[3].is_selected());
        assert_eq!(screen.rows[1].selected_count.as_ref().map(|c| c.get()), Some(1));
    }

    #[test]
    fn left_on_item_moves_to_header_first() {
        let mut screen = screen();
        screen.cursor = screen.position_of(RowKind::Item { section: 1, item: 0 }).unwrap();

        press(&mut screen, KeyCode::Left);

        assert_eq!(screen.focused_kind(), Some(RowKind::Section(1)));
        assert!(screen.model.groups()[1].is_expanded());
    }

    #[test]
    fn quit_keys() {
        let mut screen = screen();
        assert_eq!(press(&mut screen, KeyCode::Char('q')), ScreenAction::Quit);
        assert_eq!(press(&mut screen, KeyCode::Esc), ScreenAction::Quit);
        assert_eq!(
            screen.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            ScreenAction::Quit
        );
        assert_eq!(press(&mut screen, KeyCode::Down), ScreenAction::None);
    }

    #[test]
    fn log_pane_toggles() {
        let mut screen = screen();
        assert!(!screen.show_logs);
        press(&mut screen, KeyCode::Char('l'));
        assert!(screen.show_logs);
    }

    #[test]
    fn renders_glyphs_from_bindings() {
        let mut screen = screen();
        let terminal = draw(&mut screen, 70, 30);
        let lines = buffer_lines(&terminal);

        assert!(lines.iter().any(|l| l.contains("[O] Select All (0/16)")));
        assert!(lines.iter().any(|l| l.contains("[O] Section A (0/8)") && l.contains("[^]")));
        assert!(lines.iter().any(|l| l.contains("A1")));
        assert!(lines.iter().any(|l| l.contains("0/16 selected")));

        press(&mut screen, KeyCode::Char('a'));
        screen.cursor = 1;
        press(&mut screen, KeyCode::Char('e'));
        let terminal = draw(&mut screen, 70, 30);
        let lines = buffer_lines(&terminal);

        assert!(lines.iter().any(|l| l.contains("[V] Select All (16/16)")));
        assert!(lines.iter().any(|l| l.contains("[V] Section A (8/8)") && l.matches("[V]").count() == 2));
        assert!(!lines.iter().any(|l| l.contains("A1")));
        assert!(lines.iter().any(|l| l.contains("B8")));
    }

    #[test]
    fn selected_items_are_highlighted() {
        let mut screen = screen();
        let a2 = screen.position_of(RowKind::Item { section: 0, item: 1 }).unwrap();
        screen.cursor = a2;
        press(&mut screen, KeyCode::Char(' '));

        let terminal = draw(&mut screen, 70, 30);
        let area = screen.rows[a2].area.unwrap();
        let cell = &terminal.backend().buffer()[(area.x, area.y)];

        assert_eq!(cell.bg, Color::LightRed);
    }

    #[test]
    fn mouse_clicks_toggle_rows_and_expand_buttons() {
        let mut screen = screen();
        draw(&mut screen, 70, 30);

        let b2 = screen.position_of(RowKind::Item { section: 1, item: 1 }).unwrap();
        let area = screen.rows[b2].area.unwrap();
        click(&mut screen, area.x + 5, area.y);
        assert!(screen.model.groups()[1].items()[1].is_selected());
        assert_eq!(screen.cursor, b2);

        let expand = screen.rows[1]
            .expand_button
            .as_ref()
            .and_then(|button| button.area)
            .unwrap();
        click(&mut screen, expand.x, expand.y);
        assert!(!screen.model.groups()[0].is_expanded());
        assert!(!screen.model.groups()[0].is_all_selected());
        assert_eq!(screen.rows.len(), 11);
    }

    #[test]
    fn header_label_click_only_moves_the_cursor() {
        let mut screen = screen();
        draw(&mut screen, 70, 30);

        let b_header = screen.position_of(RowKind::Section(1)).unwrap();
        let select = screen.rows[b_header]
            .select_button
            .as_ref()
            .and_then(|button| button.area)
            .unwrap();
        // first character of the title, right after the select button
        click(&mut screen, select.x + select.width + 1, select.y);
        assert_eq!(screen.cursor, b_header);
        assert_eq!(screen.model.groups()[1].selected_count().get(), 0);

        click(&mut screen, select.x + 1, select.y);
        assert!(screen.model.groups()[1].is_all_selected());
        assert!(!screen.model.groups()[0].is_all_selected());

        let master = screen.rows[0].area.unwrap();
        click(&mut screen, master.x + master.width / 2, master.y);
        assert_eq!(screen.cursor, 0);
        assert!(!screen.model.is_all_selected());
    }

    #[test]
    fn scrolls_in_a_small_terminal() {
        let mut screen = screen();
        press(&mut screen, KeyCode::End);
        let terminal = draw(&mut screen, 50, 12);
        let lines = buffer_lines(&terminal);

        assert!(screen.scroll_offset > 0);
        assert!(lines.iter().any(|l| l.contains("B8")));
        assert!(!lines.iter().any(|l| l.contains("Select All")));
        assert!(screen.rows[0].area.is_none());
    }

    #[test]
    fn draws_in_very_narrow_terminals() {
        for show_logs in [false, true] {
            for width in 0..=3 {
                for height in [0, 1, 5, 8, 14] {
                    let mut screen = screen();
                    screen.show_logs = show_logs;
                    press(&mut screen, KeyCode::End);
                    draw(&mut screen, width, height);
                    assert_eq!(screen.cursor, screen.rows.len() - 1);
                }
            }
        }
    }
}
