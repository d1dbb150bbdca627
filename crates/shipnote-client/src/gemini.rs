//! Google Gemini adapter
//!
//! `POST {base_url}/models/{model}:generateContent?key=<credential>`.
//! Structured mode declares a response schema with required `title` and
//! `body` string properties.

use serde::Deserialize;
use serde_json::{Value, json};
use shipnote_core::config::{ResolvedProvider, ResponseFormat};
use shipnote_core::prompt::Prompt;
use shipnote_core::provider::Provider;

use crate::adapter::ProviderAdapter;
use crate::error::GenerationError;
use crate::transport::HttpRequest;

pub struct GeminiAdapter {
    model: String,
    base_url: String,
    structured_output: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiAdapter {
    pub fn new(settings: &ResolvedProvider) -> Self {
        Self {
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            structured_output: settings.structured_output,
        }
    }

    fn generation_config(format: ResponseFormat) -> Value {
        match format {
            ResponseFormat::Json => json!({
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "A catchy marketing headline."
                        },
                        "body": {
                            "type": "STRING",
                            "description": "The full article body, formatted as Markdown."
                        }
                    },
                    "required": ["title", "body"],
                    "propertyOrdering": ["title", "body"]
                }
            }),
            ResponseFormat::Delimited => json!({
                "responseMimeType": "text/plain"
            }),
        }
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn supports_structured_output(&self) -> bool {
        self.structured_output
    }

    fn build_request(
        &self,
        prompt: &Prompt,
        credential: &str,
        format: ResponseFormat,
    ) -> HttpRequest {
        HttpRequest {
            url: format!("{}/models/{}:generateContent", self.base_url, self.model),
            query: vec![("key".to_string(), credential.trim().to_string())],
            headers: vec![],
            body: json!({
                "systemInstruction": {
                    "parts": [{ "text": prompt.system }]
                },
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": prompt.user }]
                }],
                "generationConfig": Self::generation_config(format),
            }),
        }
    }

    fn extract_text(&self, body: &str) -> Result<String, GenerationError> {
        let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
            GenerationError::malformed(Provider::Google, format!("response is not valid JSON: {e}"))
        })?;

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!(" (prompt blocked: {r})"))
                .unwrap_or_default();
            return Err(GenerationError::malformed(
                Provider::Google,
                format!("no candidates in response{reason}"),
            ));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate
                .finish_reason
                .map(|r| format!(" (finish reason: {r})"))
                .unwrap_or_default();
            return Err(GenerationError::malformed(
                Provider::Google,
                format!("first candidate has no text{reason}"),
            ));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use shipnote_core::config::Config;
    use shipnote_core::request::GenerationRequest;

    use super::*;
    use crate::error::FailureKind;

    fn adapter() -> GeminiAdapter {
        GeminiAdapter::new(&Config::default().google_provider())
    }

    fn prompt(format: ResponseFormat) -> Prompt {
        let request = GenerationRequest::new("Added SSO.", "Blog Post", "Casual", "AIzaKey");
        Prompt::build(&request, format)
    }

    #[test]
    fn test_build_request_structured() {
        let req = adapter().build_request(
            &prompt(ResponseFormat::Json),
            " AIzaKey ",
            ResponseFormat::Json,
        );
        assert_eq!(
            req.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-09-2025:generateContent"
        );
        assert_eq!(req.query, vec![("key".to_string(), "AIzaKey".to_string())]);
        assert!(req.headers.is_empty());

        let config = &req.body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["required"], json!(["title", "body"]));
        assert_eq!(req.body["contents"][0]["role"], "user");
        assert!(
            req.body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .ends_with("Added SSO.")
        );
        assert!(
            req.body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("Tone: Casual")
        );
    }

    #[test]
    fn test_build_request_delimited_has_no_schema() {
        let req = adapter().build_request(
            &prompt(ResponseFormat::Delimited),
            "AIzaKey",
            ResponseFormat::Delimited,
        );
        assert!(req.body["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_url_never_contains_key() {
        let req = adapter().build_request(
            &prompt(ResponseFormat::Json),
            "AIzaSecret",
            ResponseFormat::Json,
        );
        assert!(!req.url.contains("AIzaSecret"));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\":"},{"text":"\"T\",\"body\":\"B\"}"}],"role":"model"},"finishReason":"STOP"}]}"#;
        assert_eq!(adapter().extract_text(body).unwrap(), r#"{"title":"T","body":"B"}"#);
    }

    #[test]
    fn test_empty_candidates_is_malformed() {
        let err = adapter().extract_text(r#"{"candidates":[]}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
    }

    #[test]
    fn test_blocked_prompt_reports_reason() {
        let err = adapter()
            .extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        assert!(err.detail().contains("SAFETY"));
    }

    #[test]
    fn test_candidate_without_text_is_malformed() {
        let err = adapter()
            .extract_text(r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        assert!(err.detail().contains("MAX_TOKENS"));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = adapter().extract_text("<html>oops</html>").unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
    }

    #[test]
    fn test_parse_response_structured() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"```json\n{\"title\":\"T\",\"body\":\"B\"}\n```"}]}}]}"#;
        let result = adapter().parse_response(body, ResponseFormat::Json).unwrap();
        assert_eq!(result.title, "T");
        assert_eq!(result.body, "B");
    }

    #[test]
    fn test_parse_response_delimited() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"TITLE: T\nCONTENT:\nB"}]}}]}"#;
        let result = adapter()
            .parse_response(body, ResponseFormat::Delimited)
            .unwrap();
        assert_eq!(result.title, "T");
        assert_eq!(result.body, "B");
    }
}
