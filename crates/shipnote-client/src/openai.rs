//! OpenAI-compatible chat completions adapter
//!
//! Works against api.openai.com and any server exposing the same
//! `/chat/completions` contract. JSON mode is requested with
//! `response_format: {"type": "json_object"}`.

use serde_json::{Value, json};
use shipnote_core::config::{ResolvedProvider, ResponseFormat};
use shipnote_core::prompt::Prompt;
use shipnote_core::provider::Provider;

use crate::adapter::ProviderAdapter;
use crate::error::GenerationError;
use crate::transport::HttpRequest;

const TEMPERATURE: f32 = 0.7;

pub struct OpenAiAdapter {
    model: String,
    base_url: String,
    structured_output: bool,
}

impl OpenAiAdapter {
    pub fn new(settings: &ResolvedProvider) -> Self {
        Self {
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            structured_output: settings.structured_output,
        }
    }
}

impl ProviderAdapter for OpenAiAdapter {
    fn provider(&self) -> Provider {
        Provider::OpenAiCompatible
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
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
            "temperature": TEMPERATURE,
        });
        if format == ResponseFormat::Json {
            body["response_format"] = json!({ "type": "json_object" });
        }

        HttpRequest {
            url: format!("{}/chat/completions", self.base_url),
            query: vec![],
            headers: vec![(
                "Authorization".to_string(),
                format!("Bearer {}", credential.trim()),
            )],
            body,
        }
    }

    fn extract_text(&self, body: &str) -> Result<String, GenerationError> {
        let json: Value = serde_json::from_str(body).map_err(|e| {
            GenerationError::malformed(
                Provider::OpenAiCompatible,
                format!("response is not valid JSON: {e}"),
            )
        })?;

        let choice = json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .ok_or_else(|| {
                GenerationError::malformed(Provider::OpenAiCompatible, "no choices in response")
            })?;

        let content = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .unwrap_or("");

        if content.trim().is_empty() {
            let reason = choice
                .get("finish_reason")
                .and_then(|r| r.as_str())
                .map(|r| format!(" (finish reason: {r})"))
                .unwrap_or_default();
            return Err(GenerationError::malformed(
                Provider::OpenAiCompatible,
                format!("first choice has no message content{reason}"),
            ));
        }

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use shipnote_core::config::Config;
    use shipnote_core::request::GenerationRequest;

    use super::*;
    use crate::error::FailureKind;

    fn adapter() -> OpenAiAdapter {
        OpenAiAdapter::new(&Config::default().openai_provider())
    }

    fn prompt() -> Prompt {
        let request = GenerationRequest::new(
            "Reduced latency by 35%.",
            "Blog Post",
            "Professional",
            "sk-test",
        );
        Prompt::build(&request, ResponseFormat::Json)
    }

    #[test]
    fn test_build_request_json_mode() {
        let req = adapter().build_request(&prompt(), "sk-test\n", ResponseFormat::Json);
        assert_eq!(req.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(
            req.headers,
            vec![("Authorization".to_string(), "Bearer sk-test".to_string())]
        );
        assert!(req.query.is_empty());
        assert_eq!(req.body["model"], "gpt-4o-mini");
        assert_eq!(req.body["messages"][0]["role"], "system");
        assert_eq!(req.body["messages"][1]["role"], "user");
        assert_eq!(req.body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_build_request_delimited_mode() {
        let req = adapter().build_request(&prompt(), "sk-test", ResponseFormat::Delimited);
        assert!(req.body.get("response_format").is_none());
    }

    #[test]
    fn test_custom_base_url() {
        let mut config = Config::default();
        config.openai.base_url = Some("http://localhost:11434/v1/".into());
        config.openai.model = Some("llama3".into());
        let adapter = OpenAiAdapter::new(&config.openai_provider());
        let req = adapter.build_request(&prompt(), "sk-local", ResponseFormat::Json);
        assert_eq!(req.url, "http://localhost:11434/v1/chat/completions");
        assert_eq!(req.body["model"], "llama3");
        assert!(adapter.supports_structured_output());
    }

    #[test]
    fn test_structured_output_flag_from_config() {
        let mut config = Config::default();
        config.openai.structured_output = Some(false);
        let adapter = OpenAiAdapter::new(&config.openai_provider());
        assert!(!adapter.supports_structured_output());
    }

    #[test]
    fn test_extract_text() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"},"finish_reason":"stop"}]}"#;
        assert_eq!(adapter().extract_text(body).unwrap(), "hello");
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        let err = adapter().extract_text(r#"{"choices":[]}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);

        let err = adapter().extract_text(r#"{"id":"x"}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
    }

    #[test]
    fn test_null_content_is_malformed() {
        let body = r#"{"choices":[{"message":{"content":null},"finish_reason":"length"}]}"#;
        let err = adapter().extract_text(body).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        assert!(err.detail().contains("length"));
    }

    #[test]
    fn test_parse_response_missing_body_is_parsing_error() {
        let body = r#"{"choices":[{"message":{"content":"{\"title\":\"T\"}"}}]}"#;
        let err = adapter().parse_response(body, ResponseFormat::Json).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ParsingError);
        assert!(err.detail().contains(r#"{"title":"T"}"#));
    }
}
