//! ASCII art banner for shipnote CLI

use colored::Colorize;

const LOGO: &str = r#"
      _     _                   _
  ___| |__ (_)_ __  _ __   ___ | |_ ___
 / __| '_ \| | '_ \| '_ \ / _ \| __/ _ \
 \__ \ | | | | |_) | | | | (_) | ||  __/
 |___/_| |_|_| .__/|_| |_|\___/ \__\___|
             |_|"#;

/// Print the shipnote ASCII art banner
pub fn print_banner() {
    for line in LOGO.lines() {
        println!("{}", line.bold());
    }
}

/// Print the banner with version info
pub fn print_banner_with_version() {
    print_banner();
    println!(
        " {} {}",
        "Changelogs in, marketing copy out".dimmed(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed(),
    );
    println!();
}
