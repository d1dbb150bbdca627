//! Built-in tone and platform presets
//!
//! Labels are free text. When a label names a preset, its guidance sentence
//! is added to the prompt; anything else is passed through as written.

/// A named prompt preset with a one-sentence guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub guidance: &'static str,
}

impl Preset {
    /// Name without the parenthesized qualifier: "Blog Post (Medium)" -> "Blog Post"
    pub fn short_name(&self) -> &'static str {
        self.name
            .split_once('(')
            .map(|(head, _)| head.trim_end())
            .unwrap_or(self.name)
    }

    fn matches(&self, label: &str) -> bool {
        let label = label.trim();
        label.eq_ignore_ascii_case(self.name) || label.eq_ignore_ascii_case(self.short_name())
    }
}

pub const TONES: &[Preset] = &[
    Preset {
        name: "Professional (SaaS, B2B)",
        guidance: "Use professional B2B language focused on value, reliability and ROI.",
    },
    Preset {
        name: "Enthusiastic (Startup)",
        guidance: "Use an energetic, exciting voice suited to startups and fast launches.",
    },
    Preset {
        name: "Formal (Enterprise)",
        guidance: "Use a formal, authoritative voice suited to large enterprises and official announcements.",
    },
    Preset {
        name: "Casual (Community)",
        guidance: "Use a friendly, relaxed voice suited to community updates and release notes.",
    },
];

pub const PLATFORMS: &[Preset] = &[
    Preset {
        name: "Blog Post (Medium)",
        guidance: "Write a medium-length blog article with a clear, engaging structure.",
    },
    Preset {
        name: "Press Release (Short)",
        guidance: "Write a concise official press release that highlights the most important business impact.",
    },
    Preset {
        name: "Email Announcement (Client-Facing)",
        guidance: "Write a customer-facing email that briefly announces the new capability.",
    },
    Preset {
        name: "Email Newsletter",
        guidance: "Write a newsletter section that leads with the customer benefit and ends with a call to action.",
    },
    Preset {
        name: "Product Changelog Entry",
        guidance: "Write a clear product changelog entry that briefly summarizes what is new.",
    },
];

/// Example changelog for trying out a credential
pub const SAMPLE_CHANGELOG: &str = "Refactored the data processing pipeline, reducing latency \
for large datasets by 35%. Removed support for the legacy v1 API.";

pub fn find_tone(label: &str) -> Option<&'static Preset> {
    TONES.iter().find(|p| p.matches(label))
}

pub fn find_platform(label: &str) -> Option<&'static Preset> {
    PLATFORMS.iter().find(|p| p.matches(label))
}
