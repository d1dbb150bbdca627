//! Generation request and result records

use serde::{Deserialize, Serialize};

/// Everything needed for one generation call. Never mutated by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Raw changelog or feature description
    pub technical_text: String,

    /// Target publication channel, e.g. "Blog Post"
    pub platform: String,

    /// Tone or audience label
    pub tone: String,

    /// Brand guidance; empty means none
    pub brand_notes: String,

    /// Text the output must imitate
    pub style_sample: Option<String>,

    /// API key; its prefix selects the provider
    pub credential: String,
}

impl GenerationRequest {
    pub fn new(
        technical_text: impl Into<String>,
        platform: impl Into<String>,
        tone: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            technical_text: technical_text.into(),
            platform: platform.into(),
            tone: tone.into(),
            brand_notes: String::new(),
            style_sample: None,
            credential: credential.into(),
        }
    }

    pub fn with_brand_notes(mut self, notes: impl Into<String>) -> Self {
        self.brand_notes = notes.into();
        self
    }

    pub fn with_style_sample(mut self, sample: impl Into<String>) -> Self {
        let sample = sample.into();
        self.style_sample = (!sample.trim().is_empty()).then_some(sample);
        self
    }
}

/// Normalized provider output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub title: String,

    /// Markdown body
    pub body: String,
}
