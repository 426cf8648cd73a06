use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::logging;
use crate::screens::{ChecklistScreen, ScreenAction};

pub struct App {
    screen: ChecklistScreen,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(screen: ChecklistScreen, tick_rate: Duration) -> Self {
        Self {
            screen,
            tick_rate,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &ChecklistScreen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Takes over the terminal until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        logging::switch_to_tui_logging();

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        logging::switch_to_console_logging();

        result
    }

    async fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut events = EventStream::new();
        // interval() rejects a zero period
        let mut ticker = tokio::time::interval(self.tick_rate.max(Duration::from_millis(1)));

        while !self.should_quit {
            terminal.draw(|f| {
                let area = f.area();
                self.screen.render(f, area);
            })?;

            tokio::select! {
                _ = ticker.tick() => self.on_tick(),
                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e).context("failed to read terminal event"),
                    None => break,
                },
            }
        }

        log::info!("Exiting checklist");
        Ok(())
    }

    fn on_tick(&mut self) {
        // Pull records into the log pane.
        tui_logger::move_events();
    }

    pub fn handle_event(&mut self, event: Event) {
        let action = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.screen.handle_key(key.code, key.modifiers)
            }
            Event::Mouse(mouse) => self.screen.handle_mouse(mouse),
            _ => ScreenAction::None,
        };
        if action == ScreenAction::Quit {
            self.should_quit = true;
        }
    }
}
