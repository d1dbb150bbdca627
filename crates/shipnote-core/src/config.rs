//! Configuration file handling for shipnote
//!
//! Config is stored at `~/.config/shipnote/config.yaml` (or the platform
//! equivalent via `dirs::config_dir()`). Every field has a default, so a
//! missing file or a partial file is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config filename within the shipnote config directory
const FILENAME: &str = "config.yaml";

/// Application directory name
const APP_DIR: &str = "shipnote";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_GOOGLE_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GOOGLE_KEY_PATTERN: &str = "^AIza";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_KEY_PATTERN: &str = "^sk-";

pub const DEFAULT_PLATFORM: &str = "Blog Post (Medium)";
pub const DEFAULT_TONE: &str = "Professional (SaaS, B2B)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config not found, run `shipnote init` to create one")]
    NotFound,

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("invalid {provider} key pattern '{pattern}': {source}")]
    KeyPattern {
        provider: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// How the provider is asked to separate the title from the body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Structured JSON when the provider is marked as supporting it,
    /// delimited text otherwise
    #[default]
    Auto,
    /// Request a `{"title", "body"}` JSON object even from a provider marked
    /// `structured_output: false`
    Structured,
    /// Always request `TITLE:` / `CONTENT:` delimited text
    Delimited,
}

/// Response format actually requested from a provider for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Delimited,
}

impl OutputMode {
    /// Pick the concrete response format for a provider.
    pub fn resolve(self, supports_structured: bool) -> ResponseFormat {
        match self {
            OutputMode::Auto if supports_structured => ResponseFormat::Json,
            OutputMode::Auto | OutputMode::Delimited => ResponseFormat::Delimited,
            OutputMode::Structured => ResponseFormat::Json,
        }
    }
}

/// Per-provider overrides. Unset fields fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Model identifier sent to the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API base URL, without a trailing slash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Regular expression a credential must match to be routed here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pattern: Option<String>,

    /// Whether the endpoint honors JSON output mode; `auto` falls back to
    /// delimited text when this is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_output: Option<bool>,
}

/// Provider settings with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub model: String,
    pub base_url: String,
    pub key_pattern: String,
    pub structured_output: bool,
}

impl ProviderSettings {
    fn resolve(&self, model: &str, base_url: &str, key_pattern: &str) -> ResolvedProvider {
        ResolvedProvider {
            model: self.model.clone().unwrap_or_else(|| model.to_string()),
            base_url: self
                .base_url
                .as_deref()
                .unwrap_or(base_url)
                .trim_end_matches('/')
                .to_string(),
            key_pattern: self
                .key_pattern
                .clone()
                .unwrap_or_else(|| key_pattern.to_string()),
            structured_output: self.structured_output.unwrap_or(true),
        }
    }
}

/// Default prompt fields used when the caller does not supply them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefaults {
    #[serde(default = "default_platform")]
    pub platform: String,

    #[serde(default = "default_tone")]
    pub tone: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub brand_notes: String,
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            tone: default_tone(),
            brand_notes: String::new(),
        }
    }
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level shipnote configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Upper bound for one provider round trip
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Outbound proxy for all provider requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    #[serde(default)]
    pub output_mode: OutputMode,

    #[serde(default)]
    pub google: ProviderSettings,

    #[serde(default)]
    pub openai: ProviderSettings,

    #[serde(default)]
    pub defaults: PromptDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy: None,
            output_mode: OutputMode::default(),
            google: ProviderSettings::default(),
            openai: ProviderSettings::default(),
            defaults: PromptDefaults::default(),
        }
    }
}

impl Config {
    /// Return the path to the config file: `<config_dir>/shipnote/config.yaml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load the config from the standard location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Load the config from the standard location, falling back to the
    /// defaults when no file exists yet.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::load() {
            Err(ConfigError::NotFound) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound
            } else {
                ConfigError::Read(e)
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to the standard location, creating the directory if needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Check the values serde cannot: non-zero timeout and compilable key patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        compile_pattern("google", &self.google_provider().key_pattern)?;
        compile_pattern("openai", &self.openai_provider().key_pattern)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Google Gemini settings with defaults applied.
    pub fn google_provider(&self) -> ResolvedProvider {
        self.google.resolve(
            DEFAULT_GOOGLE_MODEL,
            DEFAULT_GOOGLE_BASE_URL,
            DEFAULT_GOOGLE_KEY_PATTERN,
        )
    }

    /// OpenAI-compatible settings with defaults applied.
    pub fn openai_provider(&self) -> ResolvedProvider {
        self.openai.resolve(
            DEFAULT_OPENAI_MODEL,
            DEFAULT_OPENAI_BASE_URL,
            DEFAULT_OPENAI_KEY_PATTERN,
        )
    }
}

pub(crate) fn compile_pattern(provider: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::KeyPattern {
        provider,
        pattern: pattern.to_string(),
        source,
    })
}
