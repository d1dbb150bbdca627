//! Generate command: turn a changelog into marketing copy
//!
//! Merges flags with the config file, builds one `GenerationRequest`, runs a
//! single dispatch and prints (and optionally exports) the result.

use std::io::{IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use shipnote_client::{Dispatcher, FailureKind, GenerationError};
use shipnote_core::config::Config;
use shipnote_core::presets::SAMPLE_CHANGELOG;
use shipnote_core::request::GenerationRequest;
use tracing::debug;

use crate::cli::GenerateArgs;
use crate::output::{export_markdown, write_result};

pub async fn run(args: GenerateArgs, quiet: bool) -> Result<()> {
    let mut config = Config::load_or_default()?;
    apply_overrides(&mut config, &args);

    let technical_text = read_technical_text(&args)?;
    if technical_text.trim().is_empty() {
        bail!(
            "No technical text provided. Pass it as an argument, with --file, \
             with --sample, or on stdin."
        );
    }

    let request = build_request(&config, &args, technical_text)?;
    let dispatcher = Dispatcher::from_config(&config)?;

    if !quiet {
        let via = dispatcher
            .classify(&request.credential)
            .provider()
            .map(|p| format!(" with {}", p.display_name()))
            .unwrap_or_default();
        eprintln!(
            "{} Generating {} copy{}...",
            ">>".dimmed(),
            request.platform.cyan(),
            via
        );
    }

    let result = match dispatcher.dispatch(&request).await {
        Ok(result) => result,
        Err(err) => {
            print_hint(&err);
            let kind = err.kind();
            return Err(anyhow::Error::new(err).context(format!("generation failed ({kind})")));
        }
    };

    write_result(&mut std::io::stdout(), &result, &args.format)?;

    if let Some(path) = args.output.as_deref() {
        export_markdown(path, &result)?;
        if !quiet {
            eprintln!(
                "\n{} Saved to {}",
                "OK".green().bold(),
                path.display().to_string().dimmed()
            );
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &GenerateArgs) {
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(mode) = args.mode {
        config.output_mode = mode.into();
    }
    if let Some(proxy) = args.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        config.proxy = Some(proxy.trim().to_string());
    }
}

fn build_request(
    config: &Config,
    args: &GenerateArgs,
    technical_text: String,
) -> Result<GenerationRequest> {
    let platform = args
        .platform
        .clone()
        .unwrap_or_else(|| config.defaults.platform.clone());
    let tone = args
        .tone
        .clone()
        .unwrap_or_else(|| config.defaults.tone.clone());
    let brand_notes = args
        .brand_notes
        .clone()
        .unwrap_or_else(|| config.defaults.brand_notes.clone());

    let mut request = GenerationRequest::new(
        technical_text,
        platform,
        tone,
        args.api_key.clone().unwrap_or_default(),
    )
    .with_brand_notes(brand_notes);

    if let Some(sample) = &args.style_sample {
        request = request.with_style_sample(sample.clone());
    } else if let Some(path) = &args.style_file {
        request = request.with_style_sample(read_file(path)?);
    }

    Ok(request)
}

fn read_technical_text(args: &GenerateArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return read_file(path);
    }
    if args.sample {
        return Ok(SAMPLE_CHANGELOG.to_string());
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    debug!("reading changelog from stdin");
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("failed to read changelog from stdin")?;
    Ok(text)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_hint(err: &GenerationError) {
    let hint = match err.kind() {
        FailureKind::MissingCredential => {
            "Pass --api-key or set SHIPNOTE_API_KEY (sk-... for OpenAI, AIza... for Gemini)."
        }
        FailureKind::UnrecognizedCredential => {
            "Check the key, or adjust `openai.key_pattern` / `google.key_pattern` in the config."
        }
        FailureKind::ParsingError => {
            "The model ignored the output format. Retry, or use --mode delimited."
        }
        FailureKind::NetworkError => "Check your connection, proxy and --timeout.",
        FailureKind::ProviderHttpError | FailureKind::MalformedResponse => return,
    };
    eprintln!("{} {}", "Hint:".yellow().bold(), hint);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use shipnote_core::config::OutputMode;

    use super::*;
    use crate::cli::ModeArg;
    use crate::output::ResultFormat;

    fn args() -> GenerateArgs {
        GenerateArgs {
            text: Some("Added dark mode.".into()),
            file: None,
            sample: false,
            platform: None,
            tone: None,
            brand_notes: None,
            style_sample: None,
            style_file: None,
            api_key: Some("sk-test".into()),
            proxy: None,
            timeout: None,
            mode: None,
            format: ResultFormat::Markdown,
            output: None,
        }
    }

    #[test]
    fn test_request_uses_config_defaults() {
        let mut config = Config::default();
        config.defaults.brand_notes = "Say 'Acme Cloud'.".into();
        let req = build_request(&config, &args(), "text".into()).unwrap();
        assert_eq!(req.platform, "Blog Post (Medium)");
        assert_eq!(req.tone, "Professional (SaaS, B2B)");
        assert_eq!(req.brand_notes, "Say 'Acme Cloud'.");
        assert_eq!(req.credential, "sk-test");
    }

    #[test]
    fn test_flags_override_config() {
        let mut a = args();
        a.platform = Some("Email Newsletter".into());
        a.tone = Some("Casual".into());
        a.brand_notes = Some(String::new());
        a.style_sample = Some("Short. Punchy.".into());
        let req = build_request(&Config::default(), &a, "text".into()).unwrap();
        assert_eq!(req.platform, "Email Newsletter");
        assert_eq!(req.tone, "Casual");
        assert_eq!(req.brand_notes, "");
        assert_eq!(req.style_sample.as_deref(), Some("Short. Punchy."));
    }

    #[test]
    fn test_style_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.md");
        std::fs::write(&path, "We ship. You win.").unwrap();
        let mut a = args();
        a.style_file = Some(path);
        let req = build_request(&Config::default(), &a, "text".into()).unwrap();
        assert_eq!(req.style_sample.as_deref(), Some("We ship. You win."));
    }

    #[test]
    fn test_missing_style_file_errors() {
        let mut a = args();
        a.style_file = Some(PathBuf::from("/nonexistent/style.md"));
        assert!(build_request(&Config::default(), &a, "text".into()).is_err());
    }

    #[test]
    fn test_missing_api_key_becomes_empty_credential() {
        let mut a = args();
        a.api_key = None;
        let req = build_request(&Config::default(), &a, "text".into()).unwrap();
        assert_eq!(req.credential, "");
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        let mut a = args();
        a.timeout = Some(5);
        a.mode = Some(ModeArg::Delimited);
        a.proxy = Some(" http://proxy:3128 ".into());
        apply_overrides(&mut config, &a);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.output_mode, OutputMode::Delimited);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn test_read_text_sources() {
        assert_eq!(read_technical_text(&args()).unwrap(), "Added dark mode.");

        let mut a = args();
        a.text = None;
        a.sample = true;
        assert_eq!(read_technical_text(&a).unwrap(), SAMPLE_CHANGELOG);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changelog.txt");
        std::fs::write(&path, "v2.1: faster sync").unwrap();
        let mut a = args();
        a.text = None;
        a.file = Some(path);
        assert_eq!(read_technical_text(&a).unwrap(), "v2.1: faster sync");
    }
}
