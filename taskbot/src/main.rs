//! Taskbot — chat-platform to-do bot.
//!
//! Maintains a personal to-do list through `add`, `list`, `done`, and
//! `help` commands, persisting the list to a JSON file with timestamped
//! backups. Configuration via CLI flags, environment variables, or config
//! file (`~/.config/taskbot/config.toml`).
//!
//! ```bash
//! # Run with the default data directory (./data)
//! cargo run --bin taskbot
//!
//! # Custom data directory
//! cargo run --bin taskbot -- --data-dir /var/lib/taskbot
//!
//! # Or via environment variable
//! TASKBOT_DATA_DIR=/var/lib/taskbot cargo run --bin taskbot
//! ```

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use taskbot::config::{BotConfig, CliArgs};
use taskbot::dispatch;
use taskbot::gateway::console::ConsoleGateway;
use taskbot::service::TaskService;
use taskbot_core::TaskFile;

#[tokio::main]
async fn main() {
    let cli = CliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match BotConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Storage setup creates the data and backup directories; failing that
    // is the one unrecoverable startup condition.
    let file = match TaskFile::new(&config.task_file, &config.backup_dir) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error preparing data directory: {e}");
            std::process::exit(1);
        }
    };

    // Logs go to a file: the console gateway owns stdout.
    let _log_guard = init_logging(&config.log_level, &config.log_file);

    tracing::info!(
        task_file = %config.task_file.display(),
        backup_dir = %config.backup_dir.display(),
        "taskbot starting"
    );

    let service = Arc::new(TaskService::new(file));
    let mut gateway = ConsoleGateway::new();

    if let Err(e) = dispatch::run(&mut gateway, service).await {
        tracing::error!(error = %e, "gateway failed");
    }

    tracing::info!("taskbot exiting");
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure
/// all buffered log entries are flushed.
fn init_logging(level: &str, log_path: &Path) -> Option<WorkerGuard> {
    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
