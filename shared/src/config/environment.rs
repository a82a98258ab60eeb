//! Environment detection and logging configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Deployment environment the portal runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    Development,
    /// Pre-production rehearsal (homologação)
    Staging,
    /// Live portal
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Read the environment from `PNR_ENV`, falling back to `ENVIRONMENT`.
    /// Unset or unrecognized values mean development.
    pub fn from_env() -> Self {
        env::var("PNR_ENV")
            .or_else(|_| env::var("ENVIRONMENT"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Environment::Development)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "homolog" | "homologacao" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

/// Logging configuration
///
/// Consumed by the hosting binary when it installs its `tracing-subscriber`.
/// Levels use the usual `tracing` filter names.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,

    /// Output format
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Write logs to a rotating file as well as stdout
    #[serde(default)]
    pub file: Option<FileLoggingConfig>,

    /// ANSI colors on stdout
    #[serde(default = "default_colored")]
    pub colored: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: default_log_format(),
            file: None,
            colored: default_colored(),
        }
    }
}

impl LoggingConfig {
    /// Per-environment defaults: humans read development logs, collectors
    /// read staging and production ones.
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
                file: None,
                colored: true,
            },
            Environment::Staging => Self {
                level: String::from("debug"),
                format: LogFormat::Json,
                file: Some(FileLoggingConfig::default()),
                colored: false,
            },
            Environment::Production => Self {
                level: String::from("info"),
                format: LogFormat::Json,
                file: Some(FileLoggingConfig::default()),
                colored: false,
            },
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Rotating log file settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileLoggingConfig {
    /// Log file path
    pub path: PathBuf,

    /// Rotate once the file reaches this many megabytes
    #[serde(default = "default_rotate_size_mb")]
    pub rotate_size_mb: u64,

    /// Rotated files kept before the oldest is deleted
    #[serde(default = "default_keep_files")]
    pub keep_files: u32,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("logs/patas-na-rua.log"),
            rotate_size_mb: default_rotate_size_mb(),
            keep_files: default_keep_files(),
        }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_colored() -> bool {
    true
}

fn default_rotate_size_mb() -> u64 {
    50
}

fn default_keep_files() -> u32 {
    7
}
