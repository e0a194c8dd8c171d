#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod args;
pub mod commands;

use crate::args::{Cli, Command};
use anymod::domain::config::{AnymodConfig, LoggingSettings};
use anymod::kernel::config::load_config_or_env;
use anymod_logger::{LevelFilter, Logger, parse_level};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config: AnymodConfig =
        load_config_or_env(cli.config.as_deref()).context("Failed to load configuration")?;

    if !cli.search_paths.is_empty() {
        config.resolver.search_paths.clone_from(&cli.search_paths);
    }
    if let Some(handlers) = cli.handlers {
        config.resolver.handlers = handlers;
    }

    let _logger = init_logging(&config.logging, cli.verbose)?;
    debug!(
        search_paths = ?config.resolver.search_paths,
        handlers = ?config.resolver.handlers.names(),
        "Configuration loaded"
    );

    match &cli.command {
        Command::Resolve { name } => commands::resolve(&config, name)?,
        Command::Bindings => commands::bindings(&config)?,
    }

    Ok(())
}

fn init_logging(settings: &LoggingSettings, verbose: u8) -> Result<Logger> {
    let level = match verbose {
        0 => parse_level(&settings.level)?,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);
    let builder = match &settings.filter {
        Some(filter) => builder.env_filter(filter.as_str()),
        None => builder,
    };

    let logger = match &settings.directory {
        Some(directory) => builder.path(directory).json(settings.json).init(),
        None => builder.init(),
    };

    logger.context("Failed to initialize logging")
}
