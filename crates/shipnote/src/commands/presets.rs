//! Presets command: list built-in tones and platforms

use colored::Colorize;
use shipnote_core::presets::{PLATFORMS, Preset, TONES};

pub fn run() {
    print_section("Platforms", PLATFORMS);
    println!();
    print_section("Tones", TONES);
    println!(
        "\n{}",
        "Any other label is passed to the model as written.".dimmed()
    );
}

fn print_section(heading: &str, presets: &[Preset]) {
    println!("{}", heading.bold());
    for preset in presets {
        println!(
            "  {} {}",
            format!("{:<36}", preset.name).cyan(),
            preset.guidance.dimmed()
        );
    }
}
