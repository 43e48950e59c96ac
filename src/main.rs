use anyhow::Context;
use clap::Parser;

use h2mm_tui::cli::Cli;
use h2mm_tui::config::{Config, ConfigStore};
use h2mm_tui::logging;
use h2mm_tui::ui;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = ConfigStore::load(config_path).context("Failed to load configuration")?;

    ui::run(config, cli.cli_path, cli.skip_onboarding).context("UI loop failed")?;
    Ok(())
}
