//! Config command: show where settings live and what is in effect

use anyhow::Result;
use colored::Colorize;
use shipnote_core::config::Config;

pub fn run() -> Result<()> {
    let path = Config::path()?;
    let exists = path.exists();
    let config = Config::load_or_default()?;

    eprintln!(
        "{} {}{}",
        "Config file:".bold(),
        path.display(),
        if exists {
            String::new()
        } else {
            format!(" {}", "(not created yet, showing defaults)".dimmed())
        }
    );

    let google = config.google_provider();
    let openai = config.openai_provider();
    eprintln!(
        "{} {} via {} (keys matching {})",
        "Google:".bold(),
        google.model.cyan(),
        google.base_url,
        google.key_pattern
    );
    eprintln!(
        "{} {} via {} (keys matching {})",
        "OpenAI:".bold(),
        openai.model.cyan(),
        openai.base_url,
        openai.key_pattern
    );
    eprintln!();

    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}
