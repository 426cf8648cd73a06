use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonState {
    Normal,
    Focused,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonAction {
    Clicked,
    None,
}

/// A one-cell-high text button with a checked and an unchecked glyph.
///
/// The area it was last rendered into is kept for click hit-testing.
#[derive(Debug, Clone)]
pub struct ToggleButton {
    checked_label: &'static str,
    unchecked_label: &'static str,
    pub state: ButtonState,
    pub area: Option<Rect>,
}

impl ToggleButton {
    pub fn new(checked_label: &'static str, unchecked_label: &'static str) -> Self {
        Self {
            checked_label,
            unchecked_label,
            state: ButtonState::Normal,
            area: None,
        }
    }

    /// "V" when everything in scope is selected, "O" otherwise.
    pub fn select() -> Self {
        Self::new("V", "O")
    }

    /// "V" while the section is collapsed, "^" while it is expanded.
    ///
    /// Checked means collapsed.
    pub fn expand() -> Self {
        Self::new("V", "^")
    }

    pub fn label(&self, checked: bool) -> &'static str {
        if checked {
            self.checked_label
        } else {
            self.unchecked_label
        }
    }

    pub fn width(&self) -> u16 {
        let widest = self.checked_label.len().max(self.unchecked_label.len());
        // brackets on both sides
        widest as u16 + 2
    }

    pub fn set_state(&mut self, state: ButtonState) {
        self.state = state;
    }

    pub fn span(&self, checked: bool) -> Span<'static> {
        let style = match (self.state, checked) {
            (ButtonState::Focused, _) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (ButtonState::Normal, true) => Style::default().fg(Color::Green),
            (ButtonState::Normal, false) => Style::default().fg(Color::White),
        };
        Span::styled(format!("[{}]", self.label(checked)), style)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, checked: bool) {
        self.area = Some(area);
        f.render_widget(Paragraph::new(self.span(checked)), area);
    }

    pub fn handle_mouse_click(&self, column: u16, row: u16) -> ButtonAction {
        if let Some(area) = self.area {
            if column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
            {
                return ButtonAction::Clicked;
            }
        }
        ButtonAction::None
    }
}
