use async_trait::async_trait;

use crate::domain::answers::{AnswersPage, PageRequest};
use crate::domain::errors::TransportError;

/// Where answer pages come from. The HTTP client is the production
/// implementation; tests substitute scripted page sequences.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<AnswersPage, TransportError>;
}
