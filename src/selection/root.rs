use std::fmt;

use anyhow::{bail, Result};

use super::group::SectionGroup;
use crate::signal::{Combined, Signal};

/// Owner of every section; derives the master "select all" flag.
pub struct RootSelection {
    title: String,
    groups: Vec<SectionGroup>,
    all_selected: Combined<bool>,
    selected_count: Combined<usize>,
}

impl RootSelection {
    /// Fails when `groups` is empty.
    pub fn new(title: impl Into<String>, groups: Vec<SectionGroup>) -> Result<Self> {
        let title = title.into();
        if groups.is_empty() {
            bail!("'{title}' needs at least one section");
        }

        let flags: Vec<Signal<bool>> = groups.iter().map(SectionGroup::all_selected).collect();
        let all_selected = Combined::new(&flags, |values: &[bool]| values.iter().all(|v| *v));
        let counts: Vec<Signal<usize>> = groups.iter().map(SectionGroup::selected_count).collect();
        let selected_count = Combined::new(&counts, |values: &[usize]| values.iter().sum::<usize>());

        log::debug!(
            "selection: root '{title}' created with {} sections",
            groups.len()
        );

        Ok(Self {
            title,
            groups,
            all_selected,
            selected_count,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn groups(&self) -> &[SectionGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&SectionGroup> {
        self.groups.get(index)
    }

    /// AND over every section's "all selected".
    pub fn all_selected(&self) -> Signal<bool> {
        self.all_selected.signal()
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected.get()
    }

    pub fn selected_count(&self) -> Signal<usize> {
        self.selected_count.signal()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(SectionGroup::len).sum()
    }

    /// Master checkbox: unselects everything if everything is selected,
    /// otherwise selects everything.
    pub fn toggle_all(&self) {
        let was_all_selected = self.is_all_selected();
        log::debug!(
            "selection: root '{}' toggle_all (all selected: {was_all_selected})",
            self.title
        );
        for group in &self.groups {
            if was_all_selected {
                group.unselect_all();
            } else {
                group.select_all();
            }
        }
    }
}

impl fmt::Debug for RootSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootSelection")
            .field("title", &self.title)
            .field("groups", &self.groups)
            .field("all_selected", &self.is_all_selected())
            .finish()
    }
}
