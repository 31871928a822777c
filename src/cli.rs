//! Command-line interface definitions for topic_news.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Provider settings can be provided via command-line flags or environment variables.

use crate::outputs::OutputFormat;
use crate::providers::{awful_jade, gemini};
use clap::{Parser, ValueEnum};

/// Which summarization backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Google Gemini with Google Search grounding
    Gemini,
    /// Any OpenAI-compatible endpoint configured for awful_aj
    AwfulJade,
}

/// Command-line arguments for topic_news.
///
/// # Examples
///
/// ```sh
/// # Interactive prompt, one topic per line
/// GEMINI_API_KEY=... topic_news
///
/// # One search, Markdown on stdout
/// topic_news --topic "energia solar" --format markdown
///
/// # Through a local OpenAI-compatible server configured for awful_aj
/// topic_news --provider awful-jade --config ~/.config/aj/config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search this topic once and exit (omit for the interactive prompt)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Summarization backend
    #[arg(short, long, value_enum, env = "NEWS_PROVIDER", default_value_t = ProviderKind::Gemini)]
    pub provider: ProviderKind,

    /// Gemini API key (falls back to API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = gemini::DEFAULT_MODEL)]
    pub model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = gemini::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Optional path to the awful_aj config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// awful_aj chat template name
    #[arg(long, default_value = awful_jade::DEFAULT_TEMPLATE)]
    pub template: String,

    /// Output format for the rendered page
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print plain URLs instead of clickable terminal links
    #[arg(long)]
    pub no_hyperlinks: bool,
}

impl Cli {
    /// The Gemini key from `--api-key`/`GEMINI_API_KEY`, else `API_KEY`.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}
