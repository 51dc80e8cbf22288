//! Configuration system for the `Codemate` widget.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/codemate/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use crate::input::DEFAULT_MAX_HEIGHT_UNITS;

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

    /// The reply delay range is inverted.
    #[error("reply delay min ({min_ms} ms) exceeds max ({max_ms} ms)")]
    InvalidDelay {
        /// Configured minimum.
        min_ms: u64,
        /// Configured maximum.
        max_ms: u64,
    },
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    reply: ReplyFileConfig,
    input: InputFileConfig,
    ui: UiFileConfig,
}

/// `[reply]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ReplyFileConfig {
    delay_min_ms: Option<u64>,
    delay_max_ms: Option<u64>,
}

/// `[input]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct InputFileConfig {
    max_height_units: Option<u16>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    timestamp_format: Option<String>,
    copy_feedback_ms: Option<u64>,
    welcome: Option<bool>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved widget configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- Reply --
    /// Shortest simulated thinking time.
    pub reply_delay_min: Duration,
    /// Upper (exclusive) bound of the simulated thinking time.
    pub reply_delay_max: Duration,

    // -- Input --
    /// Input height cap in layout units.
    pub input_max_height_units: u16,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,
    /// How long the "copied" indicator stays up.
    pub copy_feedback: Duration,
    /// Whether to greet with a welcome message.
    pub welcome: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            reply_delay_min: Duration::from_millis(1500),
            reply_delay_max: Duration::from_millis(2500),
            input_max_height_units: DEFAULT_MAX_HEIGHT_UNITS,
            poll_timeout: Duration::from_millis(50),
            timestamp_format: "%H:%M".to_string(),
            copy_feedback: Duration::from_millis(2000),
            welcome: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed, or if the resolved delay range is inverted.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        let config = Self::resolve(cli, &file);
        config.validate()?;
        Ok(config)
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            reply_delay_min: cli
                .reply_delay_min_ms
                .or(file.reply.delay_min_ms)
                .map_or(defaults.reply_delay_min, Duration::from_millis),
            reply_delay_max: cli
                .reply_delay_max_ms
                .or(file.reply.delay_max_ms)
                .map_or(defaults.reply_delay_max, Duration::from_millis),
            input_max_height_units: file
                .input
                .max_height_units
                .unwrap_or(defaults.input_max_height_units),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.ui.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
            copy_feedback: file
                .ui
                .copy_feedback_ms
                .map_or(defaults.copy_feedback, Duration::from_millis),
            welcome: !cli.no_welcome && file.ui.welcome.unwrap_or(defaults.welcome),
        }
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelay`] when min exceeds max.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_delay_min > self.reply_delay_max {
            return Err(ConfigError::InvalidDelay {
                min_ms: u64::try_from(self.reply_delay_min.as_millis()).unwrap_or(u64::MAX),
                max_ms: u64::try_from(self.reply_delay_max.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal coding-assistant chat widget")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/codemate/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shortest simulated thinking time in milliseconds.
    #[arg(long, env = "CODEMATE_REPLY_DELAY_MIN_MS")]
    pub reply_delay_min_ms: Option<u64>,

    /// Upper bound of the simulated thinking time in milliseconds.
    #[arg(long, env = "CODEMATE_REPLY_DELAY_MAX_MS")]
    pub reply_delay_max_ms: Option<u64>,

    /// Timestamp display format (chrono format string).
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Start without the welcome message.
    #[arg(long)]
    pub no_welcome: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "CODEMATE_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/codemate.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("codemate").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
