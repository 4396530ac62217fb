use serde::{Deserialize, Serialize};

/// A single answer as returned by the `/answers` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerItem {
    pub question_id: u64,
    pub answer_id: u64,
    pub score: i64,
    pub comment_count: u32,
    pub is_accepted: bool,
}

/// One page of the answers search, including the paging envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswersPage {
    pub total: u64,
    pub page_size: u32,
    #[serde(default)]
    pub items: Vec<AnswerItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_remaining: Option<u64>,
}

impl AnswersPage {
    /// Number of pages needed to cover `total`, falling back to `requested_size`
    /// when the remote reports a zero page size.
    pub fn total_pages(&self, requested_size: u32) -> u64 {
        let size = if self.page_size == 0 {
            requested_size
        } else {
            self.page_size
        };
        if size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(size))
    }
}

/// Inclusive time range, in seconds since the epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub since: i64,
    pub until: i64,
}

impl QueryWindow {
    pub const fn new(since: i64, until: i64) -> Self {
        Self { since, until }
    }
}

/// Parameters for a single page of the answers search.
///
/// Everything except `page` stays fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub window: QueryWindow,
    pub order: &'static str,
    pub sort: &'static str,
    pub site: String,
    pub page: u64,
    pub page_size: u32,
    pub filter: String,
}

impl PageRequest {
    pub fn first(window: QueryWindow, site: &str, page_size: u32, filter: &str) -> Self {
        Self {
            window,
            order: "desc",
            sort: "activity",
            site: site.to_string(),
            page: 1,
            page_size,
            filter: filter.to_string(),
        }
    }

    pub fn for_page(&self, page: u64) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Flat query-string pairs in the order the API documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fromdate", self.window.since.to_string()),
            ("todate", self.window.until.to_string()),
            ("order", self.order.to_string()),
            ("sort", self.sort.to_string()),
            ("site", self.site.clone()),
            ("page", self.page.to_string()),
            ("pagesize", self.page_size.to_string()),
            ("filter", self.filter.clone()),
        ]
    }
}
