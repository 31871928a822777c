//! Terminal rendering.
//!
//! ```text
//! Resumo de Notícias - RIT TV
//! Digite um tema para buscar e resumir as últimas notícias.
//!
//! [1] Título da notícia
//!     Resumo da notícia...
//!     Ver notícia original (globo): https://g1.globo.com/...
//! ```
//!
//! Links are wrapped in OSC 8 escape sequences when `hyperlinks` is on, so
//! terminals that support them open the story in the browser instead of
//! navigating the page away. Provider text is stripped of control characters
//! before it reaches the terminal.

use super::{
    Page, EMPTY_HEADING, EMPTY_HINT, IDLE_HEADING, IDLE_HINT, LOADING_LABEL,
    OPEN_ORIGINAL_LABEL, PAGE_SUBTITLE, PAGE_TITLE,
};
use crate::models::{NewsArticle, SearchState};
use crate::utils::strip_controls;
use std::fmt::Write;
use url::Url;

/// Page header, printed once when the prompt starts.
pub fn render_header() -> String {
    format!("{PAGE_TITLE}\n{PAGE_SUBTITLE}\n")
}

/// Header and body together, as printed by a one-shot search.
pub fn render_page(page: &Page<'_>, hyperlinks: bool) -> String {
    format!("{}\n{}", render_header(), render_with(page, hyperlinks))
}

/// Render the page body as plain text.
pub fn render(page: &Page<'_>) -> String {
    render_with(page, false)
}

/// Render the page body, optionally with clickable terminal hyperlinks.
pub fn render_with(page: &Page<'_>, hyperlinks: bool) -> String {
    let mut out = String::new();

    if let Some(notice) = page.notice {
        writeln!(out, "! {}", notice.message()).unwrap();
    }

    match page.state {
        SearchState::Idle => {
            if page.shows_idle_placeholder() {
                writeln!(out, "{IDLE_HEADING}\n{IDLE_HINT}").unwrap();
            }
        }
        SearchState::Loading => {
            writeln!(out, "{LOADING_LABEL}").unwrap();
        }
        SearchState::Empty => {
            writeln!(out, "{EMPTY_HEADING}\n{EMPTY_HINT}").unwrap();
        }
        SearchState::Error(message) => {
            writeln!(out, "! {message}").unwrap();
        }
        SearchState::Success(articles) => {
            for (i, article) in articles.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                render_card(&mut out, i + 1, article, hyperlinks);
            }
        }
    }

    out
}

fn render_card(out: &mut String, index: usize, article: &NewsArticle, hyperlinks: bool) {
    writeln!(out, "[{index}] {}", strip_controls(&article.title)).unwrap();
    if !article.summary.is_empty() {
        for line in article.summary.lines() {
            writeln!(out, "    {}", strip_controls(line)).unwrap();
        }
    }

    let label = match article.source_tag() {
        Some(tag) => format!("{OPEN_ORIGINAL_LABEL} ({tag})"),
        None => OPEN_ORIGINAL_LABEL.to_string(),
    };
    // Only a parsed URL goes inside OSC 8; serialization percent-encodes controls
    let link = match Url::parse(&article.url) {
        Ok(parsed) if hyperlinks => {
            format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\", url = parsed.as_str())
        }
        Ok(parsed) => parsed.as_str().to_string(),
        Err(_) => strip_controls(&article.url),
    };
    writeln!(out, "    {label}: {link}").unwrap();
}
