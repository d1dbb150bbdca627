//! Error types for shipnote-client

use std::fmt;
use std::time::Duration;

use shipnote_core::parse::ParseError;
use shipnote_core::provider::Provider;
use thiserror::Error;

/// Category of a failed generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MissingCredential,
    UnrecognizedCredential,
    NetworkError,
    ProviderHttpError,
    MalformedResponse,
    ParsingError,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::MissingCredential => "missing credential",
            FailureKind::UnrecognizedCredential => "unrecognized credential",
            FailureKind::NetworkError => "network error",
            FailureKind::ProviderHttpError => "provider HTTP error",
            FailureKind::MalformedResponse => "malformed response",
            FailureKind::ParsingError => "parsing error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A generation call that did not produce a result.
/// The `Display` text is the human-readable detail.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key provided")]
    MissingCredential,

    #[error("unrecognized API key format: expected {expected}")]
    UnrecognizedCredential { expected: String },

    #[error("could not reach {provider}: {message}")]
    Network { provider: Provider, message: String },

    #[error("{provider} API error ({status}): {message}")]
    ProviderHttp {
        provider: Provider,
        status: u16,
        message: String,
    },

    #[error("malformed {provider} response: {message}")]
    MalformedResponse { provider: Provider, message: String },

    #[error("could not parse the generated text: {reason}\n\nRaw response:\n{raw}")]
    Parsing { reason: String, raw: String },
}

impl GenerationError {
    pub fn network(provider: Provider, msg: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: msg.into(),
        }
    }

    pub fn provider_http(provider: Provider, status: u16, msg: impl Into<String>) -> Self {
        Self::ProviderHttp {
            provider,
            status,
            message: msg.into(),
        }
    }

    pub fn malformed(provider: Provider, msg: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingCredential => FailureKind::MissingCredential,
            Self::UnrecognizedCredential { .. } => FailureKind::UnrecognizedCredential,
            Self::Network { .. } => FailureKind::NetworkError,
            Self::ProviderHttp { .. } => FailureKind::ProviderHttpError,
            Self::MalformedResponse { .. } => FailureKind::MalformedResponse,
            Self::Parsing { .. } => FailureKind::ParsingError,
        }
    }

    /// Diagnostic text safe to show to the user as-is.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

impl From<ParseError> for GenerationError {
    fn from(err: ParseError) -> Self {
        Self::Parsing {
            reason: err.reason,
            raw: err.raw,
        }
    }
}

/// Failure below the HTTP status level: connect, DNS, proxy, timeout, body read
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("invalid proxy '{url}': {message}")]
    Proxy { url: String, message: String },

    #[error("{0}")]
    Connect(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}
