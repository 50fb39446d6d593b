use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tdo::cli::commands::Cli;
use tdo::cli::handlers;
use tdo::io::config_io;
use tdo::model::LogConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    let config = match config_io::load_config(
        cli.config.as_deref().map(Path::new),
        cli.server.as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = if cli.command.is_none() {
        init_tui_tracing(&config.log);
        tdo::tui::run(&config)
    } else {
        init_cli_tracing(&config.log);
        handlers::dispatch(cli, &config)
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over `log.level`; both fall back to `warn`
fn env_filter(log: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log.level.as_deref().unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_cli_tracing(log: &LogConfig) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(log))
        .init();
}

/// The TUI owns the terminal, so logs go to `log.file` or nowhere
fn init_tui_tracing(log: &LogConfig) {
    let filter = env_filter(log);
    let Some(path) = log.file.as_deref() else {
        tracing_subscriber::registry().with(filter).init();
        return;
    };
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .init();
            tracing::info!(path, "logging initialized");
        }
        Err(e) => {
            eprintln!("warning: cannot open log file '{}': {}", path, e);
            tracing_subscriber::registry().with(filter).init();
        }
    }
}
