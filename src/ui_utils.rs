use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Utility functions for common UI layouts and components
pub struct LayoutUtils;

impl LayoutUtils {
    /// Title bar, content and a one-line status bar
    pub fn create_screen_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area)
            .to_vec()
    }

    /// Create a standard paragraph with title styling
    pub fn create_title_paragraph(title_text: &str) -> Paragraph<'_> {
        Paragraph::new(title_text)
            .style(Style::default().fg(Color::White).bg(Color::Blue))
            .block(Block::default().borders(Borders::ALL))
    }

    /// Checklist on the left, log pane on the right
    pub fn create_list_log_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area)
            .to_vec()
    }
}
