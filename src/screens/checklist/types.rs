use std::cell::Cell;
use std::rc::Rc;

use ratatui::layout::Rect;

use crate::components::ToggleButton;
use crate::selection::RootSelection;
use crate::signal::SubscriptionBag;
use crate::statusbar::StatusBar;

/// What a visible row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Master,
    Section(usize),
    Item { section: usize, item: usize },
}

impl RowKind {
    pub fn section(&self) -> Option<usize> {
        match self {
            RowKind::Master => None,
            RowKind::Section(section) | RowKind::Item { section, .. } => Some(*section),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Quit,
}

/// A rendered row and the signal bindings that keep it current.
///
/// Dropping or [`release`](RowBinding::release)-ing a binding unsubscribes it.
pub struct RowBinding {
    pub kind: RowKind,
    pub label: String,
    /// Number of items in scope, shown next to header labels.
    pub total: usize,
    pub checked: Rc<Cell<bool>>,
    pub selected_count: Option<Rc<Cell<usize>>>,
    pub collapsed: Option<Rc<Cell<bool>>>,
    pub select_button: Option<ToggleButton>,
    pub expand_button: Option<ToggleButton>,
    pub area: Option<Rect>,
    pub(super) bag: SubscriptionBag,
}

pub struct ChecklistScreen {
    pub model: RootSelection,
    pub rows: Vec<RowBinding>,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub current_visible_height: usize,
    pub show_logs: bool,
    pub status: StatusBar,

    // Set by the sections' expanded signals; rows are rebuilt lazily.
    pub(super) rows_dirty: Rc<Cell<bool>>,
    pub(super) layout_bag: SubscriptionBag,
}
