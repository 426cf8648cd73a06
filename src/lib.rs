//! A sectioned multi-select checklist for the terminal.
//!
//! [`selection`] holds the model: items, sections with a derived "all
//! selected" flag, and a root that derives the master flag. [`signal`] is the
//! synchronous observable value the model is built on. The rest is the ratatui
//! screen that binds to it.

pub mod app;
pub mod components;
pub mod config;
pub mod logging;
pub mod screens;
pub mod selection;
pub mod signal;
pub mod statusbar;
pub mod ui_utils;
