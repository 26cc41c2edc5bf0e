// Configuration File Support
//
// TOML configuration with environment variable overrides for the Kali CTF
// Solver MCP server. Loaded from the XDG config directory:
// ~/.config/kali-ctf-solver/config.toml
//
// Every field has a default, so the server runs with no config file at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tools::catalog::DEFAULT_WORDLIST;
use crate::tools::executor::DEFAULT_TIMEOUT_SECS;

/// Top-level server configuration, assembled from the config file and
/// then overlaid with `KALI_CTF_*` environment variables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level and output format
    pub logging: LoggingConfig,

    /// Shell execution settings
    pub execution: ExecutionConfig,

    /// Filesystem paths used by the tool handlers
    pub paths: PathsConfig,
}

/// Logging settings
///
/// All log output goes to stderr: stdout carries the JSON-RPC stream and
/// must never receive anything else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,

    /// One of json, pretty, compact
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Shell execution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Timeout in seconds applied when a tool call does not specify one
    pub default_timeout_secs: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Paths used by the tool handlers and the resource surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Wordlist handed to hash cracking when the caller does not pick one
    pub wordlist: String,

    /// Instructions document served as the resource and prompt preamble.
    /// When unset, Prompt.md is looked up next to the executable and then
    /// in the working directory.
    pub instructions: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            wordlist: DEFAULT_WORDLIST.to_string(),
            instructions: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            execution: ExecutionConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default XDG location
    ///
    /// # Errors
    ///
    /// Fails when the file exists but does not parse or does not validate.
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        Self::load_from_path(Self::config_path())
    }

    /// Load from an explicit path
    ///
    /// A missing file yields the defaults. Environment overrides and
    /// validation apply either way.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but does not parse or does not validate.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No config file at {:?}, starting from defaults", path);
            let config = Self::default().apply_env_overrides();
            config.validate()?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        let config = config.apply_env_overrides();
        config.validate()?;

        tracing::info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// The default config file location:
    /// `~/.config/kali-ctf-solver/config.toml` under XDG
    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "kali-ctf", "kali-ctf-solver")
        {
            proj_dirs.config_dir().join("config.toml")
        } else {
            // HOME-relative fallback when no XDG base resolves
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
                .join(".config")
                .join("kali-ctf-solver")
                .join("config.toml")
        }
    }

    /// Overlay `KALI_CTF_*` environment variables onto the file values:
    /// - KALI_CTF_LOG_LEVEL
    /// - KALI_CTF_LOG_FORMAT
    /// - KALI_CTF_TIMEOUT_SECS
    /// - KALI_CTF_WORDLIST
    /// - KALI_CTF_INSTRUCTIONS
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("KALI_CTF_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("KALI_CTF_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Ok(timeout) = std::env::var("KALI_CTF_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                if timeout > 0 {
                    self.execution.default_timeout_secs = timeout;
                }
            }
        }

        if let Ok(wordlist) = std::env::var("KALI_CTF_WORDLIST") {
            self.paths.wordlist = wordlist;
        }
        if let Ok(instructions) = std::env::var("KALI_CTF_INSTRUCTIONS") {
            self.paths.instructions = Some(PathBuf::from(instructions));
        }

        self
    }

    /// Reject values the server could not run with
    ///
    /// # Errors
    ///
    /// Fails on an unknown log level or format, a zero timeout, or an
    /// empty wordlist path.
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            ),
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => anyhow::bail!(
                "Invalid log format: {}. Must be one of: json, pretty, compact",
                self.logging.format
            ),
        }

        if self.execution.default_timeout_secs == 0 {
            anyhow::bail!("Default timeout must be > 0 seconds");
        }

        if self.paths.wordlist.is_empty() {
            anyhow::bail!("Wordlist path must not be empty");
        }

        Ok(())
    }

    /// Resolve the instructions document backing the resource and prompt
    /// surfaces. Explicit config wins; otherwise Prompt.md is looked up
    /// next to the executable, then in the working directory.
    pub fn instructions_path(&self) -> PathBuf {
        if let Some(path) = &self.paths.instructions {
            return path.clone();
        }

        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let candidate = dir.join("Prompt.md");
                if candidate.exists() {
                    return candidate;
                }
            }
        }

        PathBuf::from("Prompt.md")
    }

    /// Parse the configured level into a [`tracing::Level`]
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .to_lowercase()
            .parse()
            .map_err(|e| anyhow::anyhow!("Unparseable log level: {}", e))
    }
}
