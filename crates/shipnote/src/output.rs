//! Output formatting for generated copy
//!
//! Markdown (default) prints the same document the export file contains;
//! JSON prints `{"title", "body"}` for scripts.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use shipnote_core::export::to_markdown;
use shipnote_core::request::GenerationResult;

/// Output format for a generation result
#[derive(Debug, Clone, Default, clap::ValueEnum)]
pub enum ResultFormat {
    /// `# Title` followed by the Markdown body (default)
    #[default]
    Markdown,
    /// Pretty-printed JSON object with `title` and `body`
    Json,
}

/// Format and write a result to the given writer.
pub fn write_result(
    writer: &mut dyn Write,
    result: &GenerationResult,
    format: &ResultFormat,
) -> Result<()> {
    match format {
        ResultFormat::Markdown => writeln!(writer, "{}", to_markdown(result))?,
        ResultFormat::Json => writeln!(writer, "{}", serde_json::to_string_pretty(result)?)?,
    }
    Ok(())
}

/// Write the Markdown export file.
pub fn export_markdown(path: &Path, result: &GenerationResult) -> Result<()> {
    std::fs::write(path, to_markdown(result))
        .with_context(|| format!("failed to write {}", path.display()))
}
