pub mod checklist;

pub use checklist::{ChecklistScreen, RowKind, ScreenAction};
