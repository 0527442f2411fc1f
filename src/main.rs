use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::Cli;
use tui_modals::config::Config;

#[tokio::main]
async fn main() {
    // Set up panic hook for graceful error recovery
    std::panic::set_hook(Box::new(|panic_info| {
        // The terminal may still be in raw mode on the alternate screen.
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        std::process::exit(1);
    }));

    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file found or error loading it: {}", e);
    }

    match execute().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

async fn execute() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::init(cli.config.as_deref()).await?;

    let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
    if let Err(e) = init_logging(cli.debug, log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    cli.execute(config).await
}

/// Logs go to `log_file` when given. Otherwise to stderr, and only
/// warnings, since the prompt owns the terminal.
fn init_logging(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let default_filter = match (debug, log_file) {
        (true, _) => "tui_modals=debug,modals=debug",
        (false, Some(_)) => "tui_modals=info,modals=info",
        (false, None) => "tui_modals=warn,modals=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
