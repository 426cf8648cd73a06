use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_logger::TuiLoggerWidget;

use super::types::RowKind;
use crate::components::ButtonState;
use crate::ui_utils::LayoutUtils;

const HELP_TEXT: &str =
    " ↑/↓ move | SPACE toggle | ←/→ collapse/expand | e expand | a all | l logs | q quit";

impl super::ChecklistScreen {
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.sync_rows();

        let chunks = LayoutUtils::create_screen_layout(area);
        f.render_widget(LayoutUtils::create_title_paragraph(HELP_TEXT), chunks[0]);

        if self.show_logs {
            let content = LayoutUtils::create_list_log_layout(chunks[1]);
            self.render_rows(f, content[0]);
            self.render_log_pane(f, content[1]);
        } else {
            self.render_rows(f, chunks[1]);
        }

        self.status.render_status_bar(f, chunks[2]);
    }

    fn render_rows(&mut self, f: &mut Frame, area: Rect) {
        for row in &mut self.rows {
            row.area = None;
            if let Some(button) = row.select_button.as_mut() {
                button.area = None;
            }
            if let Some(button) = row.expand_button.as_mut() {
                button.area = None;
            }
        }

        let block = Block::default()
            .title(format!("Checklist ({} rows)", self.rows.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let visible_height = inner.height as usize;
        self.current_visible_height = visible_height;
        self.update_scroll_with_height(visible_height);
        if inner.is_empty() {
            return;
        }

        let needs_scrollbar = self.rows.len() > visible_height && inner.width > 1;
        let row_width = if needs_scrollbar {
            inner.width.saturating_sub(1)
        } else {
            inner.width
        };

        let start = self.scroll_offset;
        let end = (start + visible_height).min(self.rows.len());
        for (offset, index) in (start..end).enumerate() {
            let row_area = Rect {
                x: inner.x,
                y: inner.y + offset as u16,
                width: row_width,
                height: 1,
            };
            self.render_row(f, index, row_area);
        }

        if needs_scrollbar {
            self.render_scrollbar(f, inner, visible_height);
        }
    }

    fn render_row(&mut self, f: &mut Frame, index: usize, area: Rect) {
        let focused = index == self.cursor;
        let row = &mut self.rows[index];
        row.area = Some(area);
        let checked = row.is_checked();

        if let RowKind::Item { .. } = row.kind {
            let marker = if focused { "▶ " } else { "  " };
            let mut style = if checked {
                Style::default().bg(Color::LightRed).fg(Color::Black)
            } else {
                Style::default().fg(Color::White)
            };
            if focused {
                style = style.add_modifier(Modifier::BOLD);
            }
            let line = Line::from(format!("    {marker}{}", row.label)).style(style);
            f.render_widget(Paragraph::new(line).style(style), area);
            return;
        }

        let header_style = if focused {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        f.render_widget(Paragraph::new("").style(header_style), area);

        let mut x = area.x + 1;
        if let Some(button) = row.select_button.as_mut() {
            let width = button.width().min(area.width.saturating_sub(1));
            button.set_state(if focused {
                ButtonState::Focused
            } else {
                ButtonState::Normal
            });
            button.render(f, Rect { x, y: area.y, width, height: 1 }, checked);
            x += width + 1;
        }

        let expand_width = row.expand_button.as_ref().map_or(0, |b| b.width() + 1);
        let label_width = (area.x + area.width).saturating_sub(x + expand_width);
        let count = row
            .selected_count
            .as_ref()
            .map(|count| format!(" ({}/{})", count.get(), row.total))
            .unwrap_or_default();
        let label = Line::from(vec![
            Span::styled(row.label.clone(), header_style.add_modifier(Modifier::BOLD)),
            Span::styled(count, header_style),
        ]);
        f.render_widget(
            Paragraph::new(label).style(header_style),
            Rect { x, y: area.y, width: label_width, height: 1 },
        );

        let collapsed = row.is_collapsed();
        if let Some(button) = row.expand_button.as_mut() {
            let width = button.width();
            if area.width > width {
                let button_area = Rect {
                    x: area.x + area.width - width - 1,
                    y: area.y,
                    width,
                    height: 1,
                };
                button.render(f, button_area, collapsed);
            }
        }
    }

    fn render_scrollbar(&self, f: &mut Frame, inner: Rect, visible_height: usize) {
        if inner.is_empty() {
            return;
        }
        let track = Rect {
            x: inner.x + inner.width.saturating_sub(1),
            y: inner.y,
            width: 1,
            height: inner.height,
        };
        let total = self.rows.len();
        let track_height = track.height as usize;
        if track_height == 0 || total == 0 {
            return;
        }

        let thumb_size = ((visible_height * track_height) / total).max(1);
        let thumb_position = (self.scroll_offset * track_height) / total;

        for y in 0..track_height {
            let is_thumb = y >= thumb_position && y < thumb_position + thumb_size;
            let (symbol, style) = if is_thumb {
                ("█", Style::default().fg(Color::White))
            } else {
                ("│", Style::default().fg(Color::DarkGray))
            };
            f.render_widget(
                Paragraph::new(symbol).style(style),
                Rect {
                    x: track.x,
                    y: track.y + y as u16,
                    width: 1,
                    height: 1,
                },
            );
        }
    }

    fn render_log_pane(&self, f: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let logs = TuiLoggerWidget::default()
            .block(
                Block::default()
                    .title("Log")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray)),
            )
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::White))
            .style_debug(Style::default().fg(Color::DarkGray));
        f.render_widget(logs, area);
    }
}
