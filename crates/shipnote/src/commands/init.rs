//! Interactive initialization command
//!
//! Asks for the default platform, tone, brand notes and proxy, then saves
//! them to the shipnote config file. API keys are never written to disk.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use shipnote_core::config::Config;
use shipnote_core::presets::{PLATFORMS, Preset, TONES, find_platform, find_tone};

pub fn run(yes: bool) -> Result<()> {
    let path = Config::path()?;
    let mut config = Config::load_or_default()?;

    if path.exists() && !yes {
        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} already exists. Update it?", path.display()))
            .default(true)
            .interact()
            .context("confirmation cancelled")?;
        if !overwrite {
            eprintln!("Nothing changed.");
            return Ok(());
        }
    }

    if !yes {
        config.defaults.platform =
            select_preset("Default platform", PLATFORMS, find_platform(&config.defaults.platform))?;
        config.defaults.tone =
            select_preset("Default tone", TONES, find_tone(&config.defaults.tone))?;

        config.defaults.brand_notes = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Brand notes (optional)")
            .with_initial_text(config.defaults.brand_notes.clone())
            .allow_empty(true)
            .interact_text()
            .context("input cancelled")?;

        let proxy: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Proxy URL (optional)")
            .with_initial_text(config.proxy.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()
            .context("input cancelled")?;
        config.proxy = Some(proxy.trim().to_string()).filter(|p| !p.is_empty());
    }

    let path = config.save()?;

    eprintln!();
    eprintln!(
        "{} Defaults: {} / {}",
        "OK".green().bold(),
        config.defaults.platform.cyan(),
        config.defaults.tone.cyan()
    );
    eprintln!("  Config saved to {}", path.display().to_string().dimmed());
    eprintln!(
        "\n  Generate copy with: {}",
        "SHIPNOTE_API_KEY=sk-... shipnote generate \"your changelog\"".cyan()
    );

    Ok(())
}

fn select_preset(prompt: &str, presets: &[Preset], current: Option<&Preset>) -> Result<String> {
    let items: Vec<String> = presets
        .iter()
        .map(|p| format!("{:<36} - {}", p.name, p.guidance))
        .collect();
    let default = current
        .and_then(|c| presets.iter().position(|p| p.name == c.name))
        .unwrap_or(0);

    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()
        .context("selection cancelled")?;

    Ok(presets[selection].name.to_string())
}
