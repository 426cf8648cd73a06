use std::collections::HashSet;
use std::fmt;

use anyhow::{bail, Result};

use super::item::SelectableItem;
use crate::signal::{Combined, Mutable, Signal};

/// One section of the checklist: a fixed, ordered list of items, a derived
/// "all selected" flag and an expanded flag for the view.
pub struct SectionGroup {
    title: String,
    items: Vec<SelectableItem>,
    expanded: Mutable<bool>,
    all_selected: Combined<bool>,
    selected_count: Combined<usize>,
}

impl SectionGroup {
    /// Builds a section of unselected items.
    ///
    /// Fails if two names are equal; names are the items' identities.
    pub fn new<I, S>(title: impl Into<String>, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_items(title.into(), names.into_iter().map(SelectableItem::new).collect())
    }

    /// Builds a section from `(name, selected)` pairs.
    pub fn with_selection<I, S>(title: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self::from_items(
            title.into(),
            entries
                .into_iter()
                .map(|(name, selected)| SelectableItem::with_selected(name, selected))
                .collect(),
        )
    }

    fn from_items(title: String, items: Vec<SelectableItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.identity()) {
                bail!(
                    "duplicate item identity '{}' in section '{title}'",
                    item.identity()
                );
            }
        }

        let flags: Vec<Signal<bool>> = items.iter().map(SelectableItem::observe).collect();
        let all_selected = Combined::new(&flags, |values: &[bool]| values.iter().all(|v| *v));
        let selected_count = Combined::new(&flags, |values: &[bool]| {
            values.iter().filter(|v| **v).count()
        });

        log::debug!(
            "selection: section '{title}' created with {} items",
            items.len()
        );

        Ok(Self {
            title,
            items,
            expanded: Mutable::new(true),
            all_selected,
            selected_count,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[SelectableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, identity: &str) -> Option<&SelectableItem> {
        self.items.iter().find(|item| item.identity() == identity)
    }

    /// True iff every item is selected; true for an empty section.
    pub fn all_selected(&self) -> Signal<bool> {
        self.all_selected.signal()
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected.get()
    }

    pub fn selected_count(&self) -> Signal<usize> {
        self.selected_count.signal()
    }

    pub fn select_all(&self) {
        let changed = self.force_all(true);
        log::debug!(
            "selection: section '{}' select_all ({changed} items changed)",
            self.title
        );
    }

    pub fn unselect_all(&self) {
        let changed = self.force_all(false);
        log::debug!(
            "selection: section '{}' unselect_all ({changed} items changed)",
            self.title
        );
    }

    fn force_all(&self, value: bool) -> usize {
        let mut changed = 0;
        for item in &self.items {
            if item.set_selected(value) {
                changed += 1;
            }
        }
        changed
    }

    /// Section header button: unselects everything when fully selected,
    /// selects everything otherwise.
    pub fn toggle_all(&self) {
        if self.is_all_selected() {
            self.unselect_all();
        } else {
            self.select_all();
        }
    }

    pub fn expanded(&self) -> Signal<bool> {
        self.expanded.signal()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    pub fn set_expanded(&self, value: bool) {
        if self.expanded.set_neq(value) {
            log::debug!(
                "selection: section '{}' {}",
                self.title,
                if value { "expanded" } else { "collapsed" }
            );
        }
    }

    pub fn toggle_expanded(&self) {
        self.set_expanded(!self.is_expanded());
    }
}

impl fmt::Debug for SectionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionGroup")
            .field("title", &self.title)
            .field("items", &self.items)
            .field("expanded", &self.is_expanded())
            .field("all_selected", &self.is_all_selected())
            .finish()
    }
}
