use std::fmt;
use std::rc::Rc;

use crate::signal::{Mutable, Signal, Subscription};

/// A named checklist entry with an observable selected flag.
///
/// Clones share the same flag.
#[derive(Clone)]
pub struct SelectableItem {
    identity: Rc<str>,
    selected: Mutable<bool>,
}

impl SelectableItem {
    pub fn new(identity: impl Into<String>) -> Self {
        Self::with_selected(identity, false)
    }

    pub fn with_selected(identity: impl Into<String>, selected: bool) -> Self {
        Self {
            identity: Rc::from(identity.into()),
            selected: Mutable::new(selected),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn is_selected(&self) -> bool {
        self.selected.get()
    }

    /// Flips the flag. Always notifies.
    pub fn toggle(&self) {
        let next = !self.selected.get();
        log::trace!("selection: item '{}' toggled to {next}", self.identity);
        self.selected.set(next);
    }

    /// Returns `true` if the flag changed.
    pub fn set_selected(&self, value: bool) -> bool {
        self.selected.set_neq(value)
    }

    pub fn observe(&self) -> Signal<bool> {
        self.selected.signal()
    }

    pub fn subscribe(&self, f: impl Fn(&bool) + 'static) -> Subscription {
        self.selected.subscribe(f)
    }
}

impl fmt::Debug for SelectableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectableItem")
            .field("identity", &self.identity)
            .field("selected", &self.is_selected())
            .finish()
    }
}
