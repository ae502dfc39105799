mod cli;
mod console;
mod logging;

use std::process;

use age_prune::config::load_settings;
use age_prune::PruneEngine;
use anyhow::Context;
use clap::Parser;
use cli::Cli;
use colored::*;
use console::ConsoleReporter;
use dotenv::dotenv;
use tracing::debug;

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    if let Err(err) = run(args) {
        eprintln!("{} {:#}", "error:".red(), err);
        process::exit(1);
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let settings = load_settings(args.config.as_deref())
        .context("Error loading configuration")?;
    debug!("settings: {:?}", settings);

    let options = args.into_options(settings);
    debug!("options: {:?}", options);

    let engine = PruneEngine::new(options);
    let summary = engine.run(&ConsoleReporter)?;

    debug!(
        "Files: {:.2}s, Dirs: {:.2}s",
        summary.file_duration.as_secs_f64(),
        summary.dir_duration.as_secs_f64()
    );
    console::print_summary(&summary);

    Ok(())
}
