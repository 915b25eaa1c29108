use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;

mod cli;
mod config;

use cli::Cli;
use config::Config;
use readlog::session::{Controller, Prompter};
use readlog::store::Database;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("readlog")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("readlog.log");

    // The terminal is the UI, so logs only go to the file
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{} {}", "Database:".yellow(), config.database.path.display());
        println!("{} {}", "Reader:".yellow(), config.reader.username);
    }

    let db = Database::open(&config.database.path)
        .with_context(|| format!("Failed to open database at {}", config.database.path.display()))?;

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut controller = Controller::new(&db, config.reader.username.clone(), prompter);
    let outcome = controller.run();
    drop(controller);

    db.close().context("Failed to close database")?;
    outcome.context("Session aborted")?;

    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.is_verbose()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the interactive session
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
