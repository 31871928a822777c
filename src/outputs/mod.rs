//! Rendering of the search page.
//!
//! The page is the topic field, the inline notice and whatever the current
//! [`SearchState`] shows. It can be rendered in three formats:
//!
//! # Submodules
//!
//! - [`text`]: Terminal page, used by the interactive prompt
//! - [`markdown`]: Markdown document with one section per article
//! - [`json`]: [`crate::models::SearchReport`] for scripts
//!
//! # States
//!
//! | State | Shows |
//! |-------|-------|
//! | `Idle` | "Aguardando sua busca" placeholder (hidden while a notice is up) |
//! | `Loading` | "Buscando..." with input disabled |
//! | `Success` | One card per article: title, summary, link to the original |
//! | `Empty` | "Nenhuma notícia encontrada" placeholder |
//! | `Error` | The fixed error message |

pub mod json;
pub mod markdown;
pub mod text;

use crate::models::{Notice, SearchState};
use clap::ValueEnum;
use std::error::Error;

pub const PAGE_TITLE: &str = "Resumo de Notícias - RIT TV";
pub const PAGE_SUBTITLE: &str = "Digite um tema para buscar e resumir as últimas notícias.";
pub const TOPIC_PLACEHOLDER: &str = "Ex: Inovações em inteligência artificial";
pub const IDLE_HEADING: &str = "Aguardando sua busca";
pub const IDLE_HINT: &str = "Os resultados aparecerão aqui.";
pub const EMPTY_HEADING: &str = "Nenhuma notícia encontrada";
pub const EMPTY_HINT: &str = "Tente um termo de busca diferente.";
pub const LOADING_LABEL: &str = "Buscando...";
pub const OPEN_ORIGINAL_LABEL: &str = "Ver notícia original";

/// Output format for the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

/// Borrowed snapshot of everything the page shows.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub topic: &'a str,
    pub state: &'a SearchState,
    pub notice: Option<&'a Notice>,
}

impl<'a> Page<'a> {
    pub fn new(topic: &'a str, state: &'a SearchState, notice: Option<&'a Notice>) -> Self {
        Self {
            topic,
            state,
            notice,
        }
    }

    /// The idle placeholder only shows when nothing else occupies the page.
    pub fn shows_idle_placeholder(&self) -> bool {
        matches!(self.state, SearchState::Idle) && self.notice.is_none()
    }

    /// True when the page asks the user to act: a rejected topic or a failed
    /// search. Empty results are not a failure.
    pub fn is_failure(&self) -> bool {
        self.notice.is_some() || matches!(self.state, SearchState::Error(_))
    }
}

/// Render `page` in the requested format.
pub fn render(page: &Page<'_>, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    Ok(match format {
        OutputFormat::Text => text::render(page),
        OutputFormat::Markdown => markdown::render(page),
        OutputFormat::Json => json::render(page)?,
    })
}
