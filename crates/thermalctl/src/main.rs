//! Thermalctl - runs the simulated thermal-management loop
//!
//! Waits for a key, plays back the reading sequence with console alerts,
//! then waits for another key before exiting.

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use tracing::{info, warn};

use thermal_common::ConsoleSink;
use thermalctl::cli::Cli;
use thermalctl::{logging, prompt, run_simulation};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = cli.load_config().context("failed to load configuration")?;
    let config = loaded.config;
    logging::init(&config.log.level);
    if let Some(e) = &loaded.fallback {
        warn!(target: "thermal::config", "{}; using defaults", e);
    }

    info!(target: "thermalctl", "starting {}", env!("CARGO_PKG_VERSION"));

    let term = Term::stdout();
    if !cli.no_prompt {
        prompt::wait_for_key(&term, Some("Press any key to start system"))?;
    }

    let sink = ConsoleSink::new(config.display.color);
    run_simulation(&config, &sink)?;

    if !cli.no_prompt {
        prompt::wait_for_key(&term, None)?;
    }
    Ok(())
}
