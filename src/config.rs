//! Configuration management for linesweep.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::flatten::{Flattener, DEFAULT_MAX_DEPTH};
use crate::reader::{Buffering, JunkSet, Mode, ReaderOptions};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Line reader configuration.
    pub reader: ReaderSection,
    /// Flattener configuration.
    pub flatten: FlattenSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Line reader configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSection {
    /// Mode string (e.g. "r", "rb", "a+").
    pub mode: String,
    /// Buffering hint: negative for default, 0 unbuffered, 1 line, n bytes.
    pub buffering: i64,
    /// Characters removed from every line.
    pub junk: String,
}

impl Default for ReaderSection {
    fn default() -> Self {
        Self {
            mode: "r".to_string(),
            buffering: -1,
            junk: String::new(),
        }
    }
}

/// Flattener configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenSection {
    /// Maximum nesting depth accepted.
    pub max_depth: usize,
}

impl Default for FlattenSection {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("LINESWEEP_MODE") {
            self.reader.mode = mode;
        }

        if let Some(buffering) = lookup("LINESWEEP_BUFFERING") {
            if let Ok(buffering) = buffering.parse() {
                self.reader.buffering = buffering;
            }
        }

        if let Some(junk) = lookup("LINESWEEP_JUNK") {
            self.reader.junk = junk;
        }

        if let Some(depth) = lookup("LINESWEEP_MAX_DEPTH") {
            if let Ok(depth) = depth.parse() {
                self.flatten.max_depth = depth;
            }
        }

        if let Some(level) = lookup("LINESWEEP_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref mode) = args.mode {
            self.reader.mode = mode.clone();
        }

        if let Some(buffering) = args.buffering {
            self.reader.buffering = buffering;
        }

        if let Some(ref junk) = args.junk {
            self.reader.junk = junk.clone();
        }

        if let Some(depth) = args.max_depth {
            self.flatten.max_depth = depth;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Convert to reader options, validating the mode string.
    pub fn to_reader_options(&self) -> Result<ReaderOptions, ConfigError> {
        let mode: Mode = self
            .reader
            .mode
            .parse()
            .map_err(|_| ConfigError::InvalidMode(self.reader.mode.clone()))?;

        Ok(ReaderOptions::new()
            .mode(mode)
            .buffering(Buffering::from_hint(self.reader.buffering))
            .junk(JunkSet::new(&self.reader.junk)))
    }

    /// Build a flattener with the configured depth limit.
    pub fn to_flattener(&self) -> Flattener {
        Flattener::new().with_max_depth(self.flatten.max_depth)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Unknown or write-only mode string.
    InvalidMode(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidMode(mode) => write!(f, "invalid reader mode: {}", mode),
        }
    }
}

impl std::error::Error for ConfigError {}
