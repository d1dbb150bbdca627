//! Generation dispatcher
//!
//! Classifies the credential, builds the provider request, performs exactly
//! one HTTP call and normalizes the reply. Holds only immutable settings, so
//! every `dispatch` is independent of the ones before it.

use shipnote_core::config::{Config, ConfigError, OutputMode};
use shipnote_core::prompt::Prompt;
use shipnote_core::provider::{CredentialRules, ProviderChoice};
use shipnote_core::request::{GenerationRequest, GenerationResult};
use tracing::{debug, info, warn};

use crate::adapter::{ProviderAdapter, extract_error_message};
use crate::error::{GenerationError, TransportError};
use crate::gemini::GeminiAdapter;
use crate::openai::OpenAiAdapter;
use crate::transport::{CallOptions, HttpTransport, Transport};

pub struct Dispatcher<T = HttpTransport> {
    rules: CredentialRules,
    gemini: GeminiAdapter,
    openai: OpenAiAdapter,
    output_mode: OutputMode,
    options: CallOptions,
    transport: T,
}

impl Dispatcher<HttpTransport> {
    /// Create a dispatcher that talks to the real provider APIs.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::with_transport(config, HttpTransport)
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn with_transport(config: &Config, transport: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rules: CredentialRules::from_config(config)?,
            gemini: GeminiAdapter::new(&config.google_provider()),
            openai: OpenAiAdapter::new(&config.openai_provider()),
            output_mode: config.output_mode,
            options: CallOptions {
                timeout: config.timeout(),
                proxy: config.proxy.clone(),
            },
            transport,
        })
    }

    pub fn classify(&self, credential: &str) -> ProviderChoice {
        self.rules.classify(credential)
    }

    /// Generate marketing copy with the configured timeout and proxy.
    pub async fn dispatch(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.dispatch_with(request, &self.options).await
    }

    /// Generate marketing copy with per-call network settings.
    pub async fn dispatch_with(
        &self,
        request: &GenerationRequest,
        options: &CallOptions,
    ) -> Result<GenerationResult, GenerationError> {
        let credential = request.credential.trim();
        if credential.is_empty() {
            return Err(GenerationError::MissingCredential);
        }

        let adapter: &dyn ProviderAdapter = match self.rules.classify(credential) {
            ProviderChoice::OpenAiCompatible => &self.openai,
            ProviderChoice::Google => &self.gemini,
            ProviderChoice::Unrecognized => {
                warn!("credential does not match any known provider pattern");
                return Err(GenerationError::UnrecognizedCredential {
                    expected: self.rules.describe(),
                });
            }
        };
        let provider = adapter.provider();

        let format = self.output_mode.resolve(adapter.supports_structured_output());
        let prompt = Prompt::build(request, format);
        let http_request = adapter.build_request(&prompt, credential, format);

        debug!(
            provider = %provider,
            model = adapter.model(),
            url = %http_request.url,
            ?format,
            "sending generation request"
        );

        let call = self.transport.post_json(&http_request, options);
        let response = match tokio::time::timeout(options.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(GenerationError::network(provider, e.to_string())),
            Err(_) => {
                return Err(GenerationError::network(
                    provider,
                    TransportError::Timeout(options.timeout).to_string(),
                ));
            }
        };

        debug!(
            status = response.status,
            bytes = response.body.len(),
            "provider responded"
        );

        if !response.is_success() {
            return Err(GenerationError::provider_http(
                provider,
                response.status,
                extract_error_message(&response.body),
            ));
        }

        let result = adapter.parse_response(&response.body, format)?;
        info!(provider = %provider, title = %result.title, "generated copy");
        Ok(result)
    }
}
