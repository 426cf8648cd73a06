use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::types::{RowKind, ScreenAction};
use crate::components::ButtonAction;

impl super::ChecklistScreen {
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> ScreenAction {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return ScreenAction::Quit;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') => return ScreenAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Char(' ') | KeyCode::Enter => self.activate_row(self.cursor),
            KeyCode::Char('a') => self.toggle_master(),
            KeyCode::Char('e') => {
                if let Some(section) = self.focused_section() {
                    self.toggle_section_expanded(section);
                }
            }
            KeyCode::Right => {
                if let Some(section) = self.focused_section() {
                    self.set_section_expanded(section, true);
                }
            }
            KeyCode::Left => match self.focused_kind() {
                // Left on an item goes to its header, Left on a header collapses it.
                Some(RowKind::Item { .. }) => self.move_to_section_header(),
                Some(RowKind::Section(section)) => self.set_section_expanded(section, false),
                _ => {}
            },
            KeyCode::Char('l') => {
                self.show_logs = !self.show_logs;
                log::debug!("checklist: log pane {}", if self.show_logs { "shown" } else { "hidden" });
            }
            _ => {}
        }

        self.sync_rows();
        ScreenAction::None
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> ScreenAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_click(mouse.column, mouse.row),
            MouseEventKind::ScrollUp => self.move_up(),
            MouseEventKind::ScrollDown => self.move_down(),
            _ => {}
        }
        self.sync_rows();
        ScreenAction::None
    }

    fn handle_left_click(&mut self, column: u16, row: u16) {
        // Buttons first: they sit inside their header row.
        let expand_hit = self.rows.iter().find_map(|binding| {
            let button = binding.expand_button.as_ref()?;
            (button.handle_mouse_click(column, row) == ButtonAction::Clicked)
                .then_some(binding.kind.section())
                .flatten()
        });
        if let Some(section) = expand_hit {
            self.toggle_section_expanded(section);
            return;
        }

        let select_hit = self.rows.iter().position(|binding| {
            binding
                .select_button
                .as_ref()
                .is_some_and(|button| button.handle_mouse_click(column, row) == ButtonAction::Clicked)
        });
        if let Some(index) = select_hit {
            self.cursor = index;
            self.activate_row(index);
            return;
        }

        let clicked = self.rows.iter().position(|binding| {
            binding.area.is_some_and(|area| {
                column >= area.x
                    && column < area.x + area.width
                    && row >= area.y
                    && row < area.y + area.height
            })
        });
        if let Some(index) = clicked {
            self.cursor = index;
            // Header rows only toggle through their select button.
            if matches!(self.rows[index].kind, RowKind::Item { .. }) {
                self.activate_row(index);
            }
        }
    }

    /// Runs the toggle behind the row: master, section or item.
    pub fn activate_row(&mut self, index: usize) {
        let Some(kind) = self.rows.get(index).map(|row| row.kind) else {
            return;
        };

        match kind {
            RowKind::Master => self.toggle_master(),
            RowKind::Section(section) => {
                if let Some(group) = self.model.group(section) {
                    group.toggle_all();
                    let message = if group.is_all_selected() {
                        format!("Selected all in {}", group.title())
                    } else {
                        format!("Cleared {}", group.title())
                    };
                    log::info!("checklist: {message}");
                    self.status.set_status_message(message);
                }
            }
            RowKind::Item { section, item } => {
                if let Some(item) = self
                    .model
                    .group(section)
                    .and_then(|group| group.items().get(item))
                {
                    item.toggle();
                    let message = format!(
                        "{} {}",
                        item.identity(),
                        if item.is_selected() { "selected" } else { "unselected" }
                    );
                    log::info!("checklist: {message}");
                    self.status.set_status_message(message);
                }
            }
        }
    }

    pub fn toggle_master(&mut self) {
        self.model.toggle_all();
        let message = if self.model.is_all_selected() {
            "Selected everything"
        } else {
            "Cleared everything"
        };
        log::info!("checklist: {message}");
        self.status.set_status_message(message);
    }

    pub fn toggle_section_expanded(&mut self, section: usize) {
        if let Some(group) = self.model.group(section) {
            group.toggle_expanded();
            log::info!(
                "checklist: {} {}",
                group.title(),
                if group.is_expanded() { "expanded" } else { "collapsed" }
            );
        }
    }

    pub fn set_section_expanded(&mut self, section: usize, expanded: bool) {
        if let Some(group) = self.model.group(section) {
            group.set_expanded(expanded);
        }
    }
}
