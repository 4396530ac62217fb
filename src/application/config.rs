use std::time::Duration;

pub const DEFAULT_URL: &str = "https://api.stackexchange.com/2.3/answers";
pub const DEFAULT_FILTER: &str = "!)qRpaqDpV9K1pIm65pog";
pub const DEFAULT_SITE: &str = "stackoverflow";
pub const DEFAULT_MAX_PAGES: u64 = 5;
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_CONCURRENCY: usize = 1;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Settings for one stats run. Built once and handed to the orchestrator,
/// so runs with different overrides never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsConfig {
    pub url: String,
    pub filter: String,
    pub site: String,
    /// Largest page count a run may fetch before it is rejected.
    pub max_pages: u64,
    pub page_size: u32,
    pub timeout: Duration,
    /// Pages fetched at once after the first. 1 means strictly sequential.
    pub concurrency: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            filter: DEFAULT_FILTER.to_string(),
            site: DEFAULT_SITE.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: REQUEST_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Caller-supplied replacements for the defaults. Empty strings and zero
/// counts are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub filter: Option<String>,
    pub site: Option<String>,
    pub max_pages: Option<u64>,
    pub concurrency: Option<usize>,
}

impl StatsConfig {
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        let non_empty = |value: Option<String>| value.filter(|s| !s.trim().is_empty());

        if let Some(url) = non_empty(overrides.url) {
            self.url = url;
        }
        if let Some(filter) = non_empty(overrides.filter) {
            self.filter = filter;
        }
        if let Some(site) = non_empty(overrides.site) {
            self.site = site;
        }
        if let Some(max_pages) = overrides.max_pages.filter(|&n| n > 0) {
            self.max_pages = max_pages;
        }
        if let Some(concurrency) = overrides.concurrency.filter(|&n| n > 0) {
            self.concurrency = concurrency;
        }
        self
    }
}
