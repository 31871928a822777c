//! Google Gemini backend.
//!
//! Sends the search instruction to the `generateContent` endpoint with Google
//! Search grounding enabled, so the model looks up current news before
//! summarizing. Grounded calls cannot request a JSON response schema, hence
//! the reply is free text and goes through [`parse_articles`].
//!
//! # Request
//!
//! ```text
//! POST {base_url}/v1beta/models/{model}:generateContent
//! x-goog-api-key: {api_key}
//!
//! {"contents": [{"role": "user", "parts": [{"text": "..."}]}],
//!  "tools": [{"google_search": {}}]}
//! ```

use crate::api::{parse_articles, search_prompt, ProviderError, SummarizationProvider};
use crate::models::NewsArticle;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// News search through the Gemini API.
pub struct GeminiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider for the default model and endpoint.
    ///
    /// A missing key is accepted here and reported on the first search, so
    /// it surfaces like any other provider failure.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }

    fn request_body(topic: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(search_prompt(topic)),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        }
    }
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Join the text parts of the first candidate.
fn reply_text(body: &str) -> Result<String, Box<dyn Error>> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ProviderError::EmptyReply.into());
    };
    debug!(finish_reason = ?candidate.finish_reason, "Gemini candidate received");

    let text = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() {
        return Err(ProviderError::EmptyReply.into());
    }
    Ok(text)
}

impl SummarizationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn fetch_and_summarize_news(
        &self,
        topic: &str,
    ) -> Result<Vec<NewsArticle>, Box<dyn Error>> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let t0 = Instant::now();
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(topic))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                elapsed_ms = dt.as_millis() as u128,
                body_preview = %truncate_for_log(&body, 300),
                "Gemini call failed"
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, 300),
            }
            .into());
        }

        let text = reply_text(&body)?;
        let articles = parse_articles(&text)?;
        info!(
            count = articles.len(),
            elapsed_ms = dt.as_millis() as u128,
            "Gemini search completed"
        );
        Ok(articles)
    }
}
