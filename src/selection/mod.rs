//! Selection state for a sectioned checklist.
//!
//! Items own a selected flag, sections derive "all selected" from their items
//! and the root derives the master flag from its sections. Every derived value
//! is a [`Signal`](crate::signal::Signal) so a view can bind to it.

mod group;
mod item;
mod root;

pub use group::SectionGroup;
pub use item::SelectableItem;
pub use root::RootSelection;
