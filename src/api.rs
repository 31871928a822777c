//! The summarization provider seam.
//!
//! A provider takes a topic, performs exactly one call to an external
//! generative-AI service and maps the reply to [`NewsArticle`] records.
//! Failures are opaque to callers: every cause (network, HTTP status,
//! authentication, quota, malformed reply) comes back as one boxed error.
//!
//! # Architecture
//!
//! - [`SummarizationProvider`]: Core trait, implemented by the backends in
//!   [`crate::providers`] and by scripted mocks in tests
//! - [`search_prompt`]: The instruction sent to every backend
//! - [`parse_articles`]: Shared mapping from a free-text reply to articles

use crate::models::NewsArticle;
use crate::utils::{extract_json_array, looks_truncated, truncate_for_log};
use itertools::Itertools;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, warn};

/// Trait for async news search and summarization.
///
/// Implementors must not retain state between calls and must not retry.
pub trait SummarizationProvider {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Search the latest news on `topic` and summarize each article.
    ///
    /// # Arguments
    ///
    /// * `topic` - A non-empty, trimmed topic. Providers do not validate it.
    ///
    /// # Returns
    ///
    /// An ordered, possibly empty list of articles, or an opaque error.
    async fn fetch_and_summarize_news(
        &self,
        topic: &str,
    ) -> Result<Vec<NewsArticle>, Box<dyn Error>>;
}

/// Causes a provider can fail with. Callers only ever see these boxed.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,
    #[error("provider answered HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider reply contained no text")]
    EmptyReply,
    #[error("provider reply contained no JSON array")]
    NoJsonArray,
    #[error("provider reply was cut off before the JSON array ended: {0}")]
    Truncated(serde_json::Error),
    #[error("provider reply was not a valid article list: {0}")]
    Malformed(serde_json::Error),
}

/// Build the instruction sent to the model for `topic`.
pub fn search_prompt(topic: &str) -> String {
    format!(
        "Busque na internet as notícias mais recentes sobre o tema \"{topic}\". \
         Para cada notícia relevante, escreva um resumo conciso em português do Brasil. \
         Responda SOMENTE com um array JSON, sem texto adicional, no formato \
         [{{\"title\": \"título da notícia\", \"summary\": \"resumo da notícia\", \"url\": \"link da notícia original\"}}]. \
         Se nenhuma notícia for encontrada, responda com []."
    )
}

/// Loose shape of one item in the model's reply. Every field is optional so
/// a single incomplete item does not sink the whole list.
#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Map a model reply to the article list.
///
/// - Finds the JSON array in the reply (see [`extract_json_array`])
/// - Trims every field and drops items without a title or URL
/// - Collapses repeated URLs, keeping the first occurrence
///
/// # Errors
///
/// [`ProviderError::NoJsonArray`], [`ProviderError::Truncated`] or
/// [`ProviderError::Malformed`] when the reply cannot be read as a list.
pub fn parse_articles(reply: &str) -> Result<Vec<NewsArticle>, ProviderError> {
    let Some(json) = extract_json_array(reply) else {
        warn!(reply_preview = %truncate_for_log(reply, 300), "Reply holds no JSON array");
        return Err(ProviderError::NoJsonArray);
    };

    let raw: Vec<RawArticle> = serde_json::from_str(json).map_err(|e| {
        warn!(
            error = %e,
            reply_preview = %truncate_for_log(json, 300),
            "Model returned non-conforming JSON"
        );
        if looks_truncated(&e) {
            ProviderError::Truncated(e)
        } else {
            ProviderError::Malformed(e)
        }
    })?;

    let total = raw.len();
    let articles = raw
        .into_iter()
        .filter_map(|item| {
            let title = item.title.unwrap_or_default().trim().to_string();
            let url = item.url.unwrap_or_default().trim().to_string();
            if title.is_empty() || url.is_empty() {
                return None;
            }
            let summary = item.summary.unwrap_or_default().trim().to_string();
            Some(NewsArticle { title, summary, url })
        })
        .unique_by(|a| a.url.clone())
        .collect::<Vec<_>>();

    debug!(total, kept = articles.len(), "Parsed articles from reply");
    Ok(articles)
}
