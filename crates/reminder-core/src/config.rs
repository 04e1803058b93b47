//! Paths and environment for the reminder tool.
//!
//! All state lives under `~/.jira-reminder/`:
//!
//! ```text
//! ~/.jira-reminder/
//! ├── config/       # projects.xml and .env.local
//! └── logs/         # jira-reminder.log
//! ```
//!
//! # Environment Variables
//!
//! - `REMINDER_STATE_DIR`: Override the base state directory
//! - `REMINDER_CONFIG_DIR`: Override the config directory
//! - `REMINDER_LOG_DIR`: Override the log directory

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::ConfigError;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "REMINDER_STATE_DIR";

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "REMINDER_CONFIG_DIR";

/// Environment variable for custom log directory.
pub const LOG_DIR_ENV: &str = "REMINDER_LOG_DIR";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".jira-reminder";

const CONFIG_SUBDIR: &str = "config";
const LOGS_SUBDIR: &str = "logs";

/// Log file name, truncated on every run.
pub const LOG_FILE: &str = "jira-reminder.log";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the state directory.
///
/// The state directory is determined by:
/// 1. `REMINDER_STATE_DIR` environment variable if set
/// 2. `~/.jira-reminder` if home directory is available
/// 3. `.jira-reminder` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the config directory.
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(CONFIG_SUBDIR))
}

/// Get the logs directory.
pub fn logs_dir() -> PathBuf {
    std::env::var(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(LOGS_SUBDIR))
}

/// Get the default project document path.
pub fn projects_file() -> PathBuf {
    config_dir().join("projects.xml")
}

/// Get the secrets file path.
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Get the log file path.
pub fn log_file() -> PathBuf {
    logs_dir().join(LOG_FILE)
}

/// Ensure the logs directory exists.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_logs_dir() -> std::io::Result<()> {
    let dir = logs_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Load secrets into the process environment.
///
/// Reads the secrets file from the config directory, then `.env.local` in the
/// working directory. Variables already set are left alone.
pub fn load_env() {
    let env_path = env_file();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
    let _ = dotenvy::from_filename(".env.local");
}

/// Read a required environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingEnv`] if the variable is unset or blank.
pub fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}
