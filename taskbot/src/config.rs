//! Configuration system for the Taskbot binary.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskbot/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BotConfigFile {
    storage: StorageFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
    task_file: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the bot.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Taskbot — chat-platform to-do bot")]
pub struct CliArgs {
    /// Directory holding the task file, backups, and log.
    #[arg(short, long, env = "TASKBOT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to config file (default: `~/.config/taskbot/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKBOT_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Canonical task file path (e.g., `data/todo.json`).
    pub task_file: PathBuf,
    /// Backup directory path (e.g., `data/backups`).
    pub backup_dir: PathBuf,
    /// Log file path (e.g., `data/taskbot.log`).
    pub log_file: PathBuf,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            task_file: data_dir.join("todo.json"),
            backup_dir: data_dir.join("backups"),
            log_file: data_dir.join("taskbot.log"),
            log_level: "info".to_string(),
        }
    }
}

impl BotConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path is tried and a missing
    /// file is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `BotConfig` from CLI args and a parsed config file.
    ///
    /// The data directory comes from CLI > file > default (`data`). The
    /// task file, backup directory, and log file default to living inside
    /// it; file-config overrides are joined onto it unless absolute.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &BotConfigFile) -> Self {
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| file.storage.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("data"));

        let task_file = file
            .storage
            .task_file
            .as_ref()
            .map_or_else(|| PathBuf::from("todo.json"), Clone::clone);
        let backup_dir = file
            .storage
            .backup_dir
            .as_ref()
            .map_or_else(|| PathBuf::from("backups"), Clone::clone);
        let log_file = file
            .storage
            .log_file
            .as_ref()
            .map_or_else(|| PathBuf::from("taskbot.log"), Clone::clone);

        Self {
            // Path::join keeps absolute overrides as-is.
            task_file: data_dir.join(task_file),
            backup_dir: data_dir.join(backup_dir),
            log_file: data_dir.join(log_file),
            log_level: cli.log_level.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse the TOML config file.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<BotConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(BotConfigFile::default());
        };
        config_dir.join("taskbot").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BotConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
