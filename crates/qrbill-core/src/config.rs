//! # Encoder Configuration
//!
//! Deployment-level knobs for the encoder. Loaded once at startup; the
//! encode path itself never touches files or the environment.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     QRBILL_ACCOUNT_PREFIXES=CH,LI                                      │
//! │     QRBILL_LINE_ENDING=lf                                              │
//! │     QRBILL_LOG_PAYLOADS=true                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/qrbill/encoder.toml (Linux)                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     prefixes ["CH"], CRLF, payload logging off                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # encoder.toml
//! account_prefixes = ["CH", "LI"]
//! line_ending = "crlf"   # crlf | lf
//! log_payloads = false
//! ```
//!
//! The QR-IBAN institution range is a constant of the standard and cannot
//! be configured.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::account::DOMESTIC_PREFIX;
use crate::error::ConfigError;

// =============================================================================
// Line Ending
// =============================================================================

/// Separator placed between payload lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// `\r\n`, mandated by the standard.
    #[default]
    Crlf,
    /// `\n`, tolerated by later revisions.
    Lf,
}

impl LineEnding {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

impl std::str::FromStr for LineEnding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crlf" | "\\r\\n" => Ok(LineEnding::Crlf),
            "lf" | "\\n" => Ok(LineEnding::Lf),
            other => Err(ConfigError::InvalidConfig(format!(
                "Unknown line ending: '{}'. Valid options: crlf, lf",
                other
            ))),
        }
    }
}

// =============================================================================
// Encoder Configuration
// =============================================================================

/// Complete encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Country prefixes accepted on the creditor account.
    #[serde(default = "default_prefixes")]
    pub account_prefixes: Vec<String>,

    /// Separator between payload lines.
    #[serde(default)]
    pub line_ending: LineEnding,

    /// Emit the complete payload in debug logs. Off by default because the
    /// payload carries names and addresses.
    #[serde(default)]
    pub log_payloads: bool,
}

fn default_prefixes() -> Vec<String> {
    vec![DOMESTIC_PREFIX.to_string()]
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            account_prefixes: default_prefixes(),
            line_ending: LineEnding::default(),
            log_payloads: false,
        }
    }
}

impl EncoderConfig {
    /// Parses configuration from TOML text and validates it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EncoderConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (encoder.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading encoder config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_prefixes.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "account_prefixes must not be empty".into(),
            ));
        }

        for prefix in &self.account_prefixes {
            if prefix.len() != 2 || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "account prefix must be two uppercase letters, got: '{}'",
                    prefix
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(prefixes) = std::env::var("QRBILL_ACCOUNT_PREFIXES") {
            debug!(prefixes = %prefixes, "Overriding account prefixes from environment");
            self.account_prefixes = parse_prefix_list(&prefixes);
        }

        if let Ok(ending) = std::env::var("QRBILL_LINE_ENDING") {
            match ending.parse() {
                Ok(parsed) => self.line_ending = parsed,
                Err(_) => warn!(ending = %ending, "Unknown line ending in environment"),
            }
        }

        if let Ok(flag) = std::env::var("QRBILL_LOG_PAYLOADS") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.log_payloads = true,
                "0" | "false" | "no" | "off" => self.log_payloads = false,
                _ => warn!(value = %flag, "Unknown QRBILL_LOG_PAYLOADS value in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ch", "qrbill", "qrbill")
            .map(|dirs| dirs.config_dir().join("encoder.toml"))
    }
}

fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_ascii_uppercase())
        .filter(|p| !p.is_empty())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
