//! Data models for searched articles and the search lifecycle.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NewsArticle`]: One summarized article returned by a provider
//! - [`SearchState`]: The single tagged state driving what the page shows
//! - [`SearchReport`]: Serializable snapshot of the page
//! - [`Notice`]: Inline validation message shown next to the form

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Message shown when the user submits an empty topic.
pub const EMPTY_TOPIC_MESSAGE: &str = "Por favor, insira um tema para a busca.";

/// Message shown for every provider failure, whatever the cause.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Ocorreu um erro ao buscar as notícias. Verifique sua chave de API e tente novamente.";

/// A summarized news article as returned by the provider.
///
/// Built once by a provider and never mutated afterwards. The controller
/// owns the list for the duration of one search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsArticle {
    /// The article headline.
    pub title: String,
    /// A short summary of the article.
    pub summary: String,
    /// Link to the original story.
    pub url: String,
}

impl NewsArticle {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            url: url.into(),
        }
    }

    /// Extract the domain name (before .com/.org/etc) from the article URL.
    /// For example: "https://g1.globo.com/economia" -> "globo"
    ///
    /// Two-letter country suffixes after a generic label (".co.uk", ".com.br")
    /// are skipped so "https://www.bbc.co.uk/news" -> "bbc".
    pub fn source_tag(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        let mut parts: Vec<&str> = host.split('.').filter(|p| !p.is_empty()).collect();
        if parts.len() < 2 {
            return None;
        }
        // Drop the TLD, then a generic second level under a ccTLD
        parts.pop();
        if parts.len() >= 2 {
            let last = parts[parts.len() - 1];
            if matches!(last, "co" | "com" | "org" | "net" | "gov" | "edu" | "ac") {
                parts.pop();
            }
        }
        parts.last().map(|s| s.to_string())
    }
}

/// The state of the search page. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// One request is in flight.
    Loading,
    /// The provider returned at least one article.
    Success(Vec<NewsArticle>),
    /// The provider returned an empty list.
    Empty,
    /// The provider failed. Holds the user-facing message, never the raw error.
    Error(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Articles currently on display, empty unless the state is `Success`.
    pub fn articles(&self) -> &[NewsArticle] {
        match self {
            SearchState::Success(articles) => articles,
            _ => &[],
        }
    }

    /// Short lowercase label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Loading => "loading",
            SearchState::Success(_) => "success",
            SearchState::Empty => "empty",
            SearchState::Error(_) => "error",
        }
    }
}

/// Inline validation message. Lives beside [`SearchState`] so a rejected
/// submission leaves the results on screen untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub &'static str);

impl Notice {
    pub fn empty_topic() -> Self {
        Notice(EMPTY_TOPIC_MESSAGE)
    }

    pub fn message(&self) -> &'static str {
        self.0
    }
}

/// A snapshot of the page, serialized by the JSON output format.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchReport {
    /// The topic as submitted (trimmed).
    pub topic: String,
    /// Local time the report was produced, RFC 3339.
    pub searched_at: String,
    /// One of [`SearchState::label`]: `"idle"`, `"loading"`, `"success"`,
    /// `"empty"` or `"error"`.
    pub status: String,
    /// The fixed error message when `status` is `"error"`.
    pub error: Option<String>,
    /// Inline validation message, set when a blank topic was rejected.
    pub notice: Option<String>,
    pub articles: Vec<NewsArticle>,
}

impl SearchReport {
    pub fn from_state(topic: &str, state: &SearchState, notice: Option<&Notice>) -> Self {
        let error = match state {
            SearchState::Error(message) => Some(message.clone()),
            _ => None,
        };
        Self {
            topic: topic.to_string(),
            searched_at: Local::now().to_rfc3339(),
            status: state.label().to_string(),
            error,
            notice: notice.map(|n| n.message().to_string()),
            articles: state.articles().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tag_simple_domain() {
        let article = NewsArticle::new("T", "S", "https://example.com/article");
        assert_eq!(article.source_tag(), Some("example".to_string()));
    }

    #[test]
    fn test_source_tag_subdomain() {
        let article = NewsArticle::new("T", "S", "https://g1.globo.com/economia/noticia.ghtml");
        assert_eq!(article.source_tag(), Some("globo".to_string()));
    }

    #[test]
    fn test_source_tag_country_suffix() {
        let uk = NewsArticle::new("T", "S", "https://www.bbc.co.uk/news/world");
        assert_eq!(uk.source_tag(), Some("bbc".to_string()));

        let br = NewsArticle::new("T", "S", "https://www.estadao.com.br/politica");
        assert_eq!(br.source_tag(), Some("estadao".to_string()));
    }

    #[test]
    fn test_source_tag_invalid_url() {
        let article = NewsArticle::new("T", "S", "not a url");
        assert_eq!(article.source_tag(), None);

        let localhost = NewsArticle::new("T", "S", "http://localhost/x");
        assert_eq!(localhost.source_tag(), None);
    }

    #[test]
    fn test_article_deserialization() {
        let json = r#"{"title": "A", "summary": "B", "url": "C"}"#;
        let article: NewsArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article, NewsArticle::new("A", "B", "C"));
    }

    #[test]
    fn test_state_articles_only_on_success() {
        let articles = vec![NewsArticle::new("A", "B", "C")];
        assert_eq!(SearchState::Success(articles.clone()).articles(), &articles[..]);
        assert!(SearchState::Empty.articles().is_empty());
        assert!(SearchState::Loading.articles().is_empty());
        assert!(SearchState::default().articles().is_empty());
    }

    #[test]
    fn test_report_from_error_state() {
        let state = SearchState::Error(SEARCH_FAILED_MESSAGE.to_string());
        let report = SearchReport::from_state("clima", &state, None);
        assert_eq!(report.status, "error");
        assert!(report.notice.is_none());
        assert_eq!(report.error.as_deref(), Some(SEARCH_FAILED_MESSAGE));
        assert!(report.articles.is_empty());

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"topic\":\"clima\""));
    }
}
