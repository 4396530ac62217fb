use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, info};

use super::HttpFetcher;
use crate::domain::answers::{AnswersPage, PageRequest};
use crate::domain::errors::TransportError;
use crate::domain::source::AnswerSource;

/// Client for the Stack Exchange `/answers` search endpoint.
#[derive(Debug, Clone)]
pub struct StackExchangeClient {
    fetcher: HttpFetcher,
    url: Url,
    headers: HeaderMap,
}

impl StackExchangeClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            fetcher: HttpFetcher::new(timeout)?,
            url,
            headers,
        })
    }

    pub fn from_url(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid API url: {url}"))?;
        Self::new(url, timeout).context("failed to configure HTTP client")
    }
}

#[async_trait]
impl AnswerSource for StackExchangeClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<AnswersPage, TransportError> {
        let fetched = self
            .fetcher
            .get::<AnswersPage>(&self.url, &request.query_pairs(), &self.headers)
            .await?;

        info!(
            url = %fetched.final_url,
            status = fetched.status,
            page = request.page,
            "fetched answers page"
        );
        debug!(
            has_more = ?fetched.body.has_more,
            quota_remaining = ?fetched.body.quota_remaining,
            "answers page envelope"
        );

        Ok(fetched.body)
    }
}
