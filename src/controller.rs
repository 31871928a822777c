//! The search page state machine.
//!
//! ```text
//!            submit(blank)                 submit(topic)
//!   Idle ─────────────────▶ Idle + Notice ───────────────▶ Loading
//!                                                           │
//!              ┌────────────────────┬───────────────────────┤
//!              ▼                    ▼                       ▼
//!      Success(articles)          Empty               Error(message)
//! ```
//!
//! Any later submission re-enters `Loading` and discards the previous state.
//! A blank submission only sets the [`Notice`]; the state is left as it was.
//!
//! Every accepted submission gets a new generation number. An outcome is
//! applied only if it belongs to the latest generation, so a slow response
//! for an older submission can never overwrite a newer one.

use crate::api::SummarizationProvider;
use crate::models::{NewsArticle, Notice, SearchState, SEARCH_FAILED_MESSAGE};
use crate::outputs::Page;
use crate::utils::normalize_topic;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Receipt for an accepted submission, handed back to [`Controller::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    topic: String,
}

impl SearchTicket {
    /// The trimmed topic that was submitted.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the page state and drives the provider.
pub struct Controller<P> {
    provider: P,
    topic: String,
    state: SearchState,
    notice: Option<Notice>,
    generation: u64,
}

impl<P> Controller<P>
where
    P: SummarizationProvider,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            topic: String::new(),
            state: SearchState::Idle,
            notice: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The topic field as last submitted.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// True while a search is in flight; the input and submit action are
    /// disabled meanwhile.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot of what the page currently shows.
    pub fn page(&self) -> Page<'_> {
        Page::new(&self.topic, &self.state, self.notice.as_ref())
    }

    /// Accept or reject a submission.
    ///
    /// A blank topic sets the validation notice and returns it; no request is
    /// made and the state is untouched. Otherwise the page enters `Loading`,
    /// prior results and notices are cleared, and a ticket for the new
    /// generation is returned.
    pub fn begin(&mut self, topic: &str) -> Result<SearchTicket, Notice> {
        self.topic = topic.to_string();

        let Some(topic) = normalize_topic(topic) else {
            let notice = Notice::empty_topic();
            debug!(state = self.state.label(), "Rejected blank topic");
            self.notice = Some(notice.clone());
            return Err(notice);
        };

        self.generation += 1;
        self.notice = None;
        self.state = SearchState::Loading;
        debug!(generation = self.generation, %topic, "Search started");

        Ok(SearchTicket {
            generation: self.generation,
            topic: topic.to_string(),
        })
    }

    /// Apply the outcome of the search identified by `ticket`.
    ///
    /// Returns `false` when the ticket is stale and the outcome was dropped.
    /// Errors are logged here and replaced by the fixed user-facing message.
    pub fn resolve(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<NewsArticle>, Box<dyn Error>>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "Dropping outcome of superseded search"
            );
            return false;
        }

        self.state = match outcome {
            Ok(articles) if articles.is_empty() => SearchState::Empty,
            Ok(articles) => SearchState::Success(articles),
            Err(e) => {
                error!(topic = %ticket.topic, error = %e, "Search failed");
                SearchState::Error(SEARCH_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    /// Submit a topic and wait for the provider.
    ///
    /// Returns the resulting state. A blank topic returns immediately with
    /// the state unchanged and the notice set.
    #[instrument(level = "info", skip_all, fields(provider = %self.provider.name()))]
    pub async fn submit(&mut self, topic: &str) -> &SearchState {
        let Ok(ticket) = self.begin(topic) else {
            return &self.state;
        };

        let t0 = Instant::now();
        let outcome = self.provider.fetch_and_summarize_news(ticket.topic()).await;
        self.resolve(&ticket, outcome);

        info!(
            topic = %ticket.topic(),
            state = self.state.label(),
            count = self.state.articles().len(),
            elapsed_ms = t0.elapsed().as_millis() as u128,
            "Search resolved"
        );
        &self.state
    }
}
