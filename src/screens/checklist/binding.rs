use std::cell::Cell;
use std::rc::Rc;

use super::types::{ChecklistScreen, RowBinding, RowKind};
use crate::components::ToggleButton;
use crate::selection::{RootSelection, SectionGroup, SelectableItem};
use crate::signal::{Signal, SubscriptionBag};
use crate::statusbar::StatusBar;

fn bind_cell<T: Copy + 'static>(signal: &Signal<T>, bag: &mut SubscriptionBag) -> Rc<Cell<T>> {
    let cell = Rc::new(Cell::new(signal.get()));
    let sink = cell.clone();
    bag.add(signal.subscribe(move |value| sink.set(*value)));
    cell
}

impl RowBinding {
    pub fn master(model: &RootSelection) -> Self {
        let mut bag = SubscriptionBag::new();
        let checked = bind_cell(&model.all_selected(), &mut bag);
        let selected_count = bind_cell(&model.selected_count(), &mut bag);
        Self {
            kind: RowKind::Master,
            label: model.title().to_string(),
            total: model.item_count(),
            checked,
            selected_count: Some(selected_count),
            collapsed: None,
            select_button: Some(ToggleButton::select()),
            expand_button: None,
            area: None,
            bag,
        }
    }

    pub fn section(index: usize, group: &SectionGroup) -> Self {
        let mut bag = SubscriptionBag::new();
        let checked = bind_cell(&group.all_selected(), &mut bag);
        let selected_count = bind_cell(&group.selected_count(), &mut bag);

        let collapsed = Rc::new(Cell::new(!group.is_expanded()));
        let sink = collapsed.clone();
        bag.add(group.expanded().subscribe(move |expanded| sink.set(!*expanded)));

        Self {
            kind: RowKind::Section(index),
            label: group.title().to_string(),
            total: group.len(),
            checked,
            selected_count: Some(selected_count),
            collapsed: Some(collapsed),
            select_button: Some(ToggleButton::select()),
            expand_button: Some(ToggleButton::expand()),
            area: None,
            bag,
        }
    }

    pub fn item(section: usize, index: usize, item: &SelectableItem) -> Self {
        let mut bag = SubscriptionBag::new();
        let checked = bind_cell(&item.observe(), &mut bag);
        Self {
            kind: RowKind::Item {
                section,
                item: index,
            },
            label: item.identity().to_string(),
            total: 1,
            checked,
            selected_count: None,
            collapsed: None,
            select_button: None,
            expand_button: None,
            area: None,
            bag,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed.as_ref().is_some_and(|c| c.get())
    }

    pub fn subscription_count(&self) -> usize {
        self.bag.len()
    }

    /// Drops every binding; the row keeps showing its last values.
    pub fn release(&mut self) {
        self.bag.reset();
        self.area = None;
    }
}

impl ChecklistScreen {
    pub fn new(model: RootSelection) -> Self {
        let rows_dirty = Rc::new(Cell::new(true));
        let mut layout_bag = SubscriptionBag::new();
        for group in model.groups() {
            let dirty = rows_dirty.clone();
            layout_bag.add(group.expanded().subscribe_changes(move |_| dirty.set(true)));
        }

        let status = StatusBar::bind(&model);
        let mut screen = Self {
            model,
            rows: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            current_visible_height: 0,
            show_logs: false,
            status,
            rows_dirty,
            layout_bag,
        };
        screen.rebuild_rows();
        screen
    }

    /// Rebuilds the rows if a section was expanded or collapsed since the last
    /// rebuild.
    pub fn sync_rows(&mut self) {
        if self.rows_dirty.get() {
            self.rebuild_rows();
        }
    }

    pub fn rebuild_rows(&mut self) {
        let focused = self.rows.get(self.cursor).map(|row| row.kind);

        let released: usize = self.rows.iter().map(RowBinding::subscription_count).sum();
        for row in &mut self.rows {
            row.release();
        }

        let mut rows = vec![RowBinding::master(&self.model)];
        for (section, group) in self.model.groups().iter().enumerate() {
            rows.push(RowBinding::section(section, group));
            if group.is_expanded() {
                rows.extend(
                    group
                        .items()
                        .iter()
                        .enumerate()
                        .map(|(index, item)| RowBinding::item(section, index, item)),
                );
            }
        }
        log::trace!(
            "checklist: rebuilt {} rows, released {released} bindings",
            rows.len()
        );

        self.rows = rows;
        self.rows_dirty.set(false);
        self.cursor = focused
            .and_then(|kind| self.position_of(kind).or_else(|| self.fallback_position(kind)))
            .unwrap_or(0);
        self.update_scroll();
    }

    pub fn position_of(&self, kind: RowKind) -> Option<usize> {
        self.rows.iter().position(|row| row.kind == kind)
    }

    // A hidden item row falls back to its section header.
    fn fallback_position(&self, kind: RowKind) -> Option<usize> {
        match kind {
            RowKind::Item { section, .. } => self.position_of(RowKind::Section(section)),
            _ => None,
        }
    }

    pub fn layout_subscription_count(&self) -> usize {
        self.layout_bag.len()
    }
}
