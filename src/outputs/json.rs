//! JSON output for scripts.
//!
//! Serializes a [`SearchReport`]:
//!
//! ```text
//! {
//!   "topic": "energia solar",
//!   "searched_at": "2025-05-06T14:30:00-03:00",
//!   "status": "success",
//!   "error": null,
//!   "notice": null,
//!   "articles": [{"title": "...", "summary": "...", "url": "..."}]
//! }
//! ```

use super::Page;
use crate::models::SearchReport;
use tracing::debug;

pub fn render(page: &Page<'_>) -> serde_json::Result<String> {
    let report = SearchReport::from_state(page.topic.trim(), page.state, page.notice);
    debug!(status = %report.status, count = report.articles.len(), "Serializing report");
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewsArticle, Notice, SearchState, EMPTY_TOPIC_MESSAGE};

    #[test]
    fn test_success_report() {
        let state = SearchState::Success(vec![NewsArticle::new("A", "B", "C")]);
        let json = render(&Page::new(" tema ", &state, None)).unwrap();
        let report: SearchReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report.topic, "tema");
        assert_eq!(report.status, "success");
        assert!(report.error.is_none());
        assert_eq!(report.articles, vec![NewsArticle::new("A", "B", "C")]);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.searched_at).is_ok());
    }

    #[test]
    fn test_empty_report() {
        let state = SearchState::Empty;
        let json = render(&Page::new("tema", &state, None)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "empty");
        assert_eq!(value["articles"], serde_json::json!([]));
    }

    #[test]
    fn test_blank_topic_report_carries_notice() {
        let state = SearchState::Idle;
        let notice = Notice::empty_topic();
        let json = render(&Page::new("  ", &state, Some(&notice))).unwrap();
        assert!(json.contains(EMPTY_TOPIC_MESSAGE));

        let report: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.status, "idle");
        assert_eq!(report.notice.as_deref(), Some(EMPTY_TOPIC_MESSAGE));
        assert_eq!(report.topic, "");
    }

    #[test]
    fn test_notice_kept_beside_previous_results() {
        let state = SearchState::Success(vec![NewsArticle::new("A", "B", "C")]);
        let notice = Notice::empty_topic();
        let json = render(&Page::new(" ", &state, Some(&notice))).unwrap();
        let report: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.status, "success");
        assert_eq!(report.notice.as_deref(), Some(EMPTY_TOPIC_MESSAGE));
        assert_eq!(report.articles.len(), 1);
    }
}
