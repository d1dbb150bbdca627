//! Parsing of generated text into a title and a body
//!
//! Providers return free text even in structured mode, sometimes wrapped in
//! Markdown code fences. Both fields must be present and non-empty; nothing
//! is ever filled in from partial data.

use serde_json::Value;
use thiserror::Error;

use crate::config::ResponseFormat;
use crate::prompt::{CONTENT_TOKEN, TITLE_TOKEN};
use crate::request::GenerationResult;

/// Generated text that could not be split into title and body.
/// `raw` is the text exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ParseError {
    pub reason: String,
    pub raw: String,
}

impl ParseError {
    fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

/// Parse generated text according to the format that was requested.
pub fn parse_generated(text: &str, format: ResponseFormat) -> Result<GenerationResult, ParseError> {
    match format {
        ResponseFormat::Json => parse_json(text),
        ResponseFormat::Delimited => parse_delimited(text),
    }
}

/// Remove surrounding whitespace and a wrapping ```` ``` ```` / ```` ```json ```` fence.
///
/// A closing fence is only removed when the text also opened with one, so a
/// body that ends in its own code block keeps it.
pub fn strip_code_fences(text: &str) -> &str {
    let s = text.trim();
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let inner = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    inner.trim_end().strip_suffix("```").unwrap_or(inner).trim()
}

/// Strict parse of a `{"title": ..., "body": ...}` object.
pub fn parse_json(text: &str) -> Result<GenerationResult, ParseError> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| ParseError::new(format!("response is not valid JSON: {e}"), text))?;

    let Some(object) = value.as_object() else {
        return Err(ParseError::new("response JSON is not an object", text));
    };

    let field = |name: &str| -> Result<String, ParseError> {
        let value = object
            .get(name)
            .ok_or_else(|| ParseError::new(format!("missing `{name}` field"), text))?;
        let s = value
            .as_str()
            .ok_or_else(|| ParseError::new(format!("`{name}` field is not a string"), text))?
            .trim();
        if s.is_empty() {
            return Err(ParseError::new(format!("`{name}` field is empty"), text));
        }
        Ok(s.to_string())
    };

    Ok(GenerationResult {
        title: field("title")?,
        body: field("body")?,
    })
}

/// Scan for `TITLE:` and `CONTENT:` tokens and split around them.
pub fn parse_delimited(text: &str) -> Result<GenerationResult, ParseError> {
    let cleaned = strip_code_fences(text);

    let title_at = cleaned
        .find(TITLE_TOKEN)
        .ok_or_else(|| ParseError::new(format!("missing `{TITLE_TOKEN}` delimiter"), text))?;
    let after_title = &cleaned[title_at + TITLE_TOKEN.len()..];

    let content_at = after_title.find(CONTENT_TOKEN).ok_or_else(|| {
        ParseError::new(
            format!("missing `{CONTENT_TOKEN}` delimiter after `{TITLE_TOKEN}`"),
            text,
        )
    })?;

    // Models often bold the tokens: "**TITLE:** ..." / "**CONTENT:**"
    let title = after_title[..content_at]
        .trim()
        .trim_matches('*')
        .trim();
    let mut body = &after_title[content_at + CONTENT_TOKEN.len()..];
    if after_title[..content_at].trim_end().ends_with("**") {
        body = body.strip_prefix("**").unwrap_or(body);
    }
    let body = body.trim();

    if title.is_empty() {
        return Err(ParseError::new("title is empty", text));
    }
    if body.is_empty() {
        return Err(ParseError::new("content is empty", text));
    }

    Ok(GenerationResult {
        title: title.to_string(),
        body: body.to_string(),
    })
}
