//! Provider adapter interface
//!
//! Each backend turns a `Prompt` into an `HttpRequest` and turns a successful
//! response body back into a `GenerationResult`. Everything provider-specific
//! stays behind this trait.

use serde_json::Value;
use shipnote_core::config::ResponseFormat;
use shipnote_core::parse::parse_generated;
use shipnote_core::prompt::Prompt;
use shipnote_core::provider::Provider;
use shipnote_core::request::GenerationResult;

use crate::error::GenerationError;
use crate::transport::HttpRequest;

pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    fn model(&self) -> &str;

    /// Whether `auto` output mode may ask this endpoint for JSON.
    fn supports_structured_output(&self) -> bool;

    fn build_request(
        &self,
        prompt: &Prompt,
        credential: &str,
        format: ResponseFormat,
    ) -> HttpRequest;

    /// Pull the generated text out of a 2xx response body.
    /// Missing or empty containers are `MalformedResponse`.
    fn extract_text(&self, body: &str) -> Result<String, GenerationError>;

    fn parse_response(
        &self,
        body: &str,
        format: ResponseFormat,
    ) -> Result<GenerationResult, GenerationError> {
        let text = self.extract_text(body)?;
        Ok(parse_generated(&text, format)?)
    }
}

/// Extract a human-readable message from a provider error body.
///
/// Both Gemini and OpenAI-compatible APIs use `{"error": {"message": ...}}`.
pub fn extract_error_message(body: &str) -> String {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        json.get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(String::from)
    });
    match message {
        Some(m) => m,
        None if body.trim().is_empty() => "(empty response body)".to_string(),
        None => body.trim().to_string(),
    }
}
