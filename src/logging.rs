use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;

static TUI_MODE: AtomicBool = AtomicBool::new(false);

/// Installs `env_logger` as the global logger.
///
/// Every record is forwarded into a `tui_logger` drain so it shows up in the
/// log pane later; records are also printed to stderr until
/// [`switch_to_tui_logging`] is called.
pub fn init_logger(level: LevelFilter) {
    let drain = tui_logger::Drain::new();
    let result = env_logger::Builder::default()
        .filter_level(level)
        .format(move |buf, record| {
            drain.log(record);

            if is_tui_mode() {
                return Ok(());
            }

            let timestamp = chrono::Local::now().format("%H:%M:%S");
            let level = record.level();
            let message = record.args();
            let target = record.target();
            if target != record.module_path().unwrap_or("unknown") {
                writeln!(buf, "[{timestamp}] {level} [{target}]: {message}")
            } else {
                writeln!(buf, "[{timestamp}] {level}: {message}")
            }
        })
        .try_init();

    match result {
        Ok(()) => {
            tui_logger::set_default_level(level);
            log::debug!("Logger initialized at {level} level");
        }
        Err(e) => log::warn!("logger already installed: {e}"),
    }
}

/// Stops console output; called once the terminal enters the alternate screen.
pub fn switch_to_tui_logging() {
    TUI_MODE.store(true, Ordering::Relaxed);
    log::info!("Switched to TUI logging mode");
}

pub fn switch_to_console_logging() {
    TUI_MODE.store(false, Ordering::Relaxed);
}

pub fn is_tui_mode() -> bool {
    TUI_MODE.load(Ordering::Relaxed)
}
