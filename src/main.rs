use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use section_select::app::App;
use section_select::config::ChecklistConfig;
use section_select::logging;
use section_select::screens::ChecklistScreen;

#[derive(Parser, Debug)]
#[command(name = "section-select", version, about = "Sectioned multi-select checklist")]
struct Args {
    /// JSON file describing the sections and their items
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Redraw interval in milliseconds
    #[arg(long, default_value_t = 250)]
    tick_rate_ms: u64,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logger(args.log_level);

    let config = match &args.config {
        Some(path) => ChecklistConfig::load(path)?,
        None => ChecklistConfig::default(),
    };

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let screen = ChecklistScreen::new(config.build()?);
    let mut app = App::new(screen, Duration::from_millis(args.tick_rate_ms));
    app.run().await
}
