//! CLI argument definitions using clap

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use shipnote_core::config::OutputMode;
use shipnote_core::export::DEFAULT_EXPORT_FILENAME;

use crate::output::ResultFormat;

/// Turn technical changelogs into marketing copy
#[derive(Parser)]
#[command(name = "shipnote")]
#[command(author, version, about)]
#[command(long_about = "Turn technical changelogs into marketing copy.\n\n\
    Sends your release notes to Google Gemini or an OpenAI-compatible API, picked \
    from the shape of your API key, and prints a title and a Markdown body.")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate marketing copy from a technical changelog
    Generate(GenerateArgs),

    /// List the built-in tone and platform presets
    Presets,

    /// Create a config file with your default platform, tone and brand notes
    Init {
        /// Accept defaults without prompting
        #[arg(long, short)]
        yes: bool,
    },

    /// Show the config file location and effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Technical changelog text (reads stdin when omitted and piped)
    pub text: Option<String>,

    /// Read the changelog from a file
    #[arg(long, short, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Use a built-in example changelog
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub sample: bool,

    /// Target platform, e.g. "Blog Post" or "Email Newsletter"
    #[arg(long, short)]
    pub platform: Option<String>,

    /// Tone or audience, e.g. "Professional" or "Casual"
    #[arg(long, short)]
    pub tone: Option<String>,

    /// Brand guidance to follow
    #[arg(long)]
    pub brand_notes: Option<String>,

    /// Text whose style the output must imitate
    #[arg(long)]
    pub style_sample: Option<String>,

    /// Read the style sample from a file
    #[arg(long, conflicts_with = "style_sample")]
    pub style_file: Option<PathBuf>,

    /// API key: `sk-...` for OpenAI-compatible, `AIza...` for Google Gemini
    #[arg(long, env = "SHIPNOTE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Route the provider request through this proxy
    #[arg(long, env = "SHIPNOTE_PROXY")]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// How the model is asked to separate title and body
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// How to print the result
    #[arg(long, value_enum, default_value_t)]
    pub format: ResultFormat,

    /// Also write the result as a Markdown file
    #[arg(long, short, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILENAME)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Structured JSON when supported
    Auto,
    /// Always request a JSON object
    Structured,
    /// Request TITLE:/CONTENT: delimited text
    Delimited,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => OutputMode::Auto,
            ModeArg::Structured => OutputMode::Structured,
            ModeArg::Delimited => OutputMode::Delimited,
        }
    }
}

#[derive(Clone, clap::ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Generate(args)) => {
                crate::commands::generate::run(args, self.quiet).await
            }
            Some(Commands::Presets) => {
                crate::commands::presets::run();
                Ok(())
            }
            Some(Commands::Init { yes }) => crate::commands::init::run(yes),
            Some(Commands::Config) => crate::commands::config::run(),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::generate_completions(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                // Show help when no subcommand is given
                use clap::CommandFactory;
                let mut cmd = Self::command();
                cmd.print_help()?;
                println!();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "shipnote",
            "generate",
            "Reduced latency by 35%.",
            "--platform",
            "Blog Post",
            "--api-key",
            "sk-test",
            "--mode",
            "delimited",
            "--format",
            "json",
        ])
        .unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.text.as_deref(), Some("Reduced latency by 35%."));
        assert_eq!(args.platform.as_deref(), Some("Blog Post"));
        assert_eq!(args.api_key.as_deref(), Some("sk-test"));
        assert!(matches!(args.mode, Some(ModeArg::Delimited)));
        assert!(matches!(args.format, ResultFormat::Json));
        assert!(args.output.is_none());
    }

    #[test]
    fn test_output_flag_without_value_uses_default_name() {
        let cli = Cli::try_parse_from(["shipnote", "generate", "--sample", "--output"]).unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.output, Some(PathBuf::from("ai_generated_content.md")));
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = Cli::try_parse_from(["shipnote", "generate", "text", "--file", "notes.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Cli::try_parse_from(["shipnote", "generate", "--sample", "--timeout", "0"]);
        assert!(result.is_err());
    }
}
