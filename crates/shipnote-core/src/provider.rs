//! Provider selection from the shape of a credential
//!
//! A credential is never validated here. Its prefix only decides which
//! backend receives the request; whether the key works is known after the
//! provider answers.

use std::fmt;

use regex::Regex;

use crate::config::{
    Config, ConfigError, DEFAULT_GOOGLE_KEY_PATTERN, DEFAULT_OPENAI_KEY_PATTERN, compile_pattern,
};

/// A concrete LLM backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
    OpenAiCompatible,
}

impl Provider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Google => "Google Gemini",
            Provider::OpenAiCompatible => "OpenAI-compatible",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of classifying a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderChoice {
    Google,
    OpenAiCompatible,
    Unrecognized,
}

impl ProviderChoice {
    pub fn provider(self) -> Option<Provider> {
        match self {
            ProviderChoice::Google => Some(Provider::Google),
            ProviderChoice::OpenAiCompatible => Some(Provider::OpenAiCompatible),
            ProviderChoice::Unrecognized => None,
        }
    }
}

/// Ordered credential patterns. OpenAI is checked before Google.
#[derive(Debug, Clone)]
pub struct CredentialRules {
    openai: Regex,
    google: Regex,
}

impl CredentialRules {
    pub fn new(openai_pattern: &str, google_pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            openai: compile_pattern("openai", openai_pattern)?,
            google: compile_pattern("google", google_pattern)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            &config.openai_provider().key_pattern,
            &config.google_provider().key_pattern,
        )
    }

    /// Classify a credential by its prefix. First matching rule wins.
    pub fn classify(&self, credential: &str) -> ProviderChoice {
        let credential = credential.trim();
        if credential.is_empty() {
            return ProviderChoice::Unrecognized;
        }
        if self.openai.is_match(credential) {
            ProviderChoice::OpenAiCompatible
        } else if self.google.is_match(credential) {
            ProviderChoice::Google
        } else {
            ProviderChoice::Unrecognized
        }
    }

    /// Human-readable list of accepted key shapes, for error messages.
    pub fn describe(&self) -> String {
        format!(
            "an OpenAI key matching `{}` or a Google key matching `{}`",
            self.openai.as_str(),
            self.google.as_str()
        )
    }
}

impl Default for CredentialRules {
    fn default() -> Self {
        Self {
            openai: Regex::new(DEFAULT_OPENAI_KEY_PATTERN).expect("built-in key pattern is valid"),
            google: Regex::new(DEFAULT_GOOGLE_KEY_PATTERN).expect("built-in key pattern is valid"),
        }
    }
}
