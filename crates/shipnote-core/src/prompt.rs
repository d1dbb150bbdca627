//! Prompt construction
//!
//! Builds the system instruction (role, platform, tone, brand notes, style
//! sample, output rules) and the user message carrying the changelog.

use crate::config::ResponseFormat;
use crate::presets;
use crate::request::GenerationRequest;

const ROLE: &str = "Act as a B2B SaaS marketing copywriter. Your job is to turn dense \
technical release notes into compelling marketing content. Use professional, \
customer-centric language and highlight the value to the reader.";

const NO_BRAND_NOTES: &str = "None provided";

const JSON_RULES: &str = "Output rules:\n\
- Respond with a single JSON object and nothing else.\n\
- The object must have exactly two string keys: \"title\" and \"body\".\n\
- \"title\" is a short, catchy headline (no more than 12 words, no Markdown).\n\
- \"body\" is the full content formatted as Markdown.";

const DELIMITED_RULES: &str = "Output rules:\n\
- The first line must start with `TITLE:` followed by a short, catchy headline \
(no more than 12 words, no Markdown).\n\
- The next line must be `CONTENT:` and everything after it is the full content \
formatted as Markdown.\n\
- Do not write anything before `TITLE:`.";

/// Token that introduces the title in delimited output
pub const TITLE_TOKEN: &str = "TITLE:";

/// Token that introduces the body in delimited output
pub const CONTENT_TOKEN: &str = "CONTENT:";

/// A provider-agnostic prompt: one system instruction plus one user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn build(request: &GenerationRequest, format: ResponseFormat) -> Self {
        let mut system = String::from(ROLE);

        system.push_str("\n\nTarget platform: ");
        push_label(&mut system, &request.platform, presets::find_platform(&request.platform));

        system.push_str("\nTone: ");
        push_label(&mut system, &request.tone, presets::find_tone(&request.tone));

        system.push_str("\nBrand notes: ");
        let notes = request.brand_notes.trim();
        system.push_str(if notes.is_empty() { NO_BRAND_NOTES } else { notes });

        if let Some(sample) = request
            .style_sample
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            system.push_str(
                "\n\nStyle sample: you MUST imitate the voice, sentence length and \
                 formatting of the following text.\n--- STYLE SAMPLE ---\n",
            );
            system.push_str(sample);
            system.push_str("\n--- END STYLE SAMPLE ---");
        }

        system.push_str("\n\n");
        system.push_str(match format {
            ResponseFormat::Json => JSON_RULES,
            ResponseFormat::Delimited => DELIMITED_RULES,
        });

        let user = format!(
            "Turn the following technical changelog into marketing content:\n\n\
             --- TECHNICAL CHANGELOG ---\n{}",
            request.technical_text.trim()
        );

        Self { system, user }
    }
}

fn push_label(out: &mut String, label: &str, preset: Option<&presets::Preset>) {
    out.push_str(label.trim());
    if let Some(p) = preset {
        out.push_str(" (");
        out.push_str(p.guidance);
        out.push(')');
    }
}
