pub mod answers;

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::domain::errors::{TransportError, TransportErrorKind};

pub use answers::StackExchangeClient;

const USER_AGENT: &str = concat!("stackstats/", env!("CARGO_PKG_VERSION"));

/// A decoded response together with the URL that was actually requested.
#[derive(Debug, Clone)]
pub struct FetchedPage<T> {
    pub body: T,
    pub final_url: String,
    pub status: u16,
}

/// Thin GET-and-decode wrapper around `reqwest`. Every failure is a
/// [`TransportError`]; nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { http })
    }

    pub async fn get<T>(
        &self,
        url: &Url,
        params: &[(&str, String)],
        headers: &HeaderMap,
    ) -> Result<FetchedPage<T>, TransportError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(url.clone())
            .query(params)
            .headers(headers.clone())
            .send()
            .await?;

        let final_url = response.url().to_string();
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::http(format!(
                "request to {final_url} failed ({status}): {text}"
            )));
        }

        let body = serde_json::from_str(&text).map_err(|e| {
            TransportError::invalid_body(format!("failed to decode response from {final_url}: {e}"))
        })?;

        Ok(FetchedPage {
            body,
            final_url,
            status: status.as_u16(),
        })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connection
        } else if err.is_decode() {
            TransportErrorKind::InvalidBody
        } else {
            TransportErrorKind::Http
        };
        TransportError::new(kind, err.to_string())
    }
}
