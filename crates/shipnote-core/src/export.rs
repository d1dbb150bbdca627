//! Markdown export of a generation result

use crate::request::GenerationResult;

/// File name offered when the caller does not choose one
pub const DEFAULT_EXPORT_FILENAME: &str = "ai_generated_content.md";

/// Render `# <title>\n\n<body>`.
pub fn to_markdown(result: &GenerationResult) -> String {
    format!("# {}\n\n{}", result.title, result.body)
}
