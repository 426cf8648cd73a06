pub mod toggle_button;

pub use toggle_button::{ButtonAction, ButtonState, ToggleButton};
