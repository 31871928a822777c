//! Summarization provider backends.
//!
//! | Backend | Module | Transport | Credentials |
//! |---------|--------|-----------|-------------|
//! | Google Gemini | [`gemini`] | `generateContent` with Google Search grounding | `GEMINI_API_KEY` / `API_KEY` |
//! | OpenAI-compatible | [`awful_jade`] | `awful_aj::api::ask` | `awful_aj` `config.yaml` |
//!
//! Both implement [`crate::api::SummarizationProvider`] and share the reply
//! mapping in [`crate::api::parse_articles`].

pub mod awful_jade;
pub mod gemini;

pub use awful_jade::AwfulJadeProvider;
pub use gemini::GeminiProvider;

use crate::api::SummarizationProvider;
use crate::models::NewsArticle;
use std::error::Error;

/// The backend chosen at startup.
#[derive(Debug)]
pub enum Provider {
    Gemini(GeminiProvider),
    AwfulJade(AwfulJadeProvider),
}

impl SummarizationProvider for Provider {
    fn name(&self) -> &str {
        match self {
            Provider::Gemini(p) => p.name(),
            Provider::AwfulJade(p) => p.name(),
        }
    }

    async fn fetch_and_summarize_news(
        &self,
        topic: &str,
    ) -> Result<Vec<NewsArticle>, Box<dyn Error>> {
        match self {
            Provider::Gemini(p) => p.fetch_and_summarize_news(topic).await,
            Provider::AwfulJade(p) => p.fetch_and_summarize_news(topic).await,
        }
    }
}
