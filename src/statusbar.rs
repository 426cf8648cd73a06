use std::cell::Cell;
use std::rc::Rc;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::selection::RootSelection;
use crate::signal::SubscriptionBag;

/// Bottom line of the screen: selection totals and the last status message.
pub struct StatusBar {
    pub status_message: String,
    selected: Rc<Cell<usize>>,
    all_selected: Rc<Cell<bool>>,
    total: usize,
    _bag: SubscriptionBag,
}

impl StatusBar {
    pub fn bind(model: &RootSelection) -> Self {
        let selected = Rc::new(Cell::new(0));
        let all_selected = Rc::new(Cell::new(false));

        let mut bag = SubscriptionBag::new();
        let sink = selected.clone();
        bag.add(model.selected_count().subscribe(move |count| sink.set(*count)));
        let sink = all_selected.clone();
        bag.add(model.all_selected().subscribe(move |all| sink.set(*all)));

        Self {
            status_message: "Ready".to_string(),
            selected,
            all_selected,
            total: model.item_count(),
            _bag: bag,
        }
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn selected(&self) -> usize {
        self.selected.get()
    }

    pub fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let counts = Span::styled(
            format!(" {}/{} selected", self.selected(), self.total),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        );
        let state = if self.all_selected.get() {
            Span::styled(" (all selected)", Style::default().fg(Color::Green))
        } else {
            Span::styled(" (partial)", Style::default().fg(Color::Yellow))
        };
        let line = Line::from(vec![
            counts,
            state,
            Span::raw(" | "),
            Span::raw(self.status_message.clone()),
        ]);
        let status = Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White));
        f.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChecklistConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(status: &StatusBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                status.render_status_bar(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn follows_model_counts() {
        let root = ChecklistConfig::default().build().unwrap();
        let mut status = StatusBar::bind(&root);
        assert!(rendered(&status).starts_with(" 0/16 selected (partial) | Ready"));

        root.groups()[0].select_all();
        assert_eq!(status.selected(), 8);

        root.toggle_all();
        status.set_status_message("Selected everything");
        assert!(rendered(&status).starts_with(" 16/16 selected (all selected) | Selected everything"));
    }
}
