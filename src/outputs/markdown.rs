//! Markdown rendering.
//!
//! Produces a standalone document: the page title, the searched topic, then
//! one `##` section per article. Links use inline HTML with
//! `target="_blank"` so renderers that allow it open the story in a new tab.
//! Control characters in provider text are dropped.

use super::{
    Page, EMPTY_HEADING, EMPTY_HINT, IDLE_HEADING, IDLE_HINT, LOADING_LABEL,
    OPEN_ORIGINAL_LABEL, PAGE_SUBTITLE, PAGE_TITLE,
};
use crate::models::SearchState;
use crate::utils::strip_controls;
use std::fmt::Write;

/// Render the page as a Markdown document.
pub fn render(page: &Page<'_>) -> String {
    let mut md = String::new();

    writeln!(md, "# {PAGE_TITLE}\n").unwrap();

    let topic = page.topic.trim();
    if topic.is_empty() {
        writeln!(md, "{PAGE_SUBTITLE}\n").unwrap();
    } else {
        writeln!(md, "**Tema:** {}\n", escape(&strip_controls(topic))).unwrap();
    }

    if let Some(notice) = page.notice {
        writeln!(md, "> **{}**\n", notice.message()).unwrap();
    }

    match page.state {
        SearchState::Idle => {
            if page.shows_idle_placeholder() {
                writeln!(md, "### {IDLE_HEADING}\n\n{IDLE_HINT}\n").unwrap();
            }
        }
        SearchState::Loading => {
            writeln!(md, "_{LOADING_LABEL}_\n").unwrap();
        }
        SearchState::Empty => {
            writeln!(md, "### {EMPTY_HEADING}\n\n{EMPTY_HINT}\n").unwrap();
        }
        SearchState::Error(message) => {
            writeln!(md, "> **{message}**\n").unwrap();
        }
        SearchState::Success(articles) => {
            for article in articles {
                writeln!(md, "## {}\n", escape(&strip_controls(&article.title))).unwrap();
                if !article.summary.is_empty() {
                    for line in article.summary.lines() {
                        writeln!(md, "{}", strip_controls(line)).unwrap();
                    }
                    md.push('\n');
                }
                writeln!(
                    md,
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{OPEN_ORIGINAL_LABEL}</a>\n",
                    attr_escape(&strip_controls(&article.url))
                )
                .unwrap();
            }
        }
    }

    md
}

/// Escape characters that would turn a heading or topic line into markup.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '>' | '#') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn attr_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewsArticle, Notice};

    #[test]
    fn test_idle_document() {
        let state = SearchState::Idle;
        let md = render(&Page::new("", &state, None));
        assert!(md.starts_with("# Resumo de Notícias - RIT TV\n"));
        assert!(md.contains(PAGE_SUBTITLE));
        assert!(md.contains("### Aguardando sua busca"));
    }

    #[test]
    fn test_success_document() {
        let state = SearchState::Success(vec![NewsArticle::new("A", "B", "C")]);
        let md = render(&Page::new("tema", &state, None));
        assert!(md.contains("**Tema:** tema"));
        assert!(md.contains("## A\n\nB\n"));
        assert!(md.contains(
            "<a href=\"C\" target=\"_blank\" rel=\"noopener noreferrer\">Ver notícia original</a>"
        ));
    }

    #[test]
    fn test_empty_and_notice() {
        let notice = Notice::empty_topic();
        let state = SearchState::Empty;
        let md = render(&Page::new("x", &state, Some(&notice)));
        assert!(md.contains("> **Por favor, insira um tema para a busca.**"));
        assert!(md.contains("### Nenhuma notícia encontrada"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape("C# *news*"), "C\\# \\*news\\*");
        assert_eq!(
            attr_escape("https://x.example/?a=1&b=\"2\""),
            "https://x.example/?a=1&amp;b=&quot;2&quot;"
        );
    }

    #[test]
    fn test_control_characters_dropped() {
        let state = SearchState::Success(vec![NewsArticle::new(
            "T\x1b[31m",
            "um\x07\ndois",
            "https://a.example/\x1b",
        )]);
        let md = render(&Page::new("tema", &state, None));
        assert!(md.contains("## T\\[31m\n"));
        assert!(md.contains("um\ndois\n\n"));
        assert!(!md.contains('\x1b'));
        assert!(!md.contains('\x07'));
    }
}
