use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{error, info};

use crate::application::config::StatsConfig;
use crate::domain::aggregate::Aggregator;
use crate::domain::answers::{PageRequest, QueryWindow};
use crate::domain::errors::StatsError;
use crate::domain::source::AnswerSource;
use crate::domain::stats::StatsReport;

/// Runs stats queries against one answer source with a fixed configuration.
#[derive(Clone)]
pub struct StatsService {
    source: Arc<dyn AnswerSource>,
    config: StatsConfig,
}

impl StatsService {
    pub fn new(source: Arc<dyn AnswerSource>, config: StatsConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub async fn compute(&self, window: QueryWindow) -> Result<StatsReport, StatsError> {
        compute_stats(&*self.source, &self.config, window).await
    }
}

/// Fetches every page for `window` and folds it into a `StatsReport`.
///
/// Page 1 decides how many pages exist. If that exceeds `config.max_pages`
/// the run stops with `RemoteDataTooLarge` before anything else is fetched.
/// Remaining pages are folded strictly in page order, at most
/// `config.concurrency` in flight at a time.
pub async fn compute_stats(
    source: &dyn AnswerSource,
    config: &StatsConfig,
    window: QueryWindow,
) -> Result<StatsReport, StatsError> {
    let start = Instant::now();
    info!(
        since = window.since,
        until = window.until,
        "beginning stats calculation"
    );

    let first_request = PageRequest::first(window, &config.site, config.page_size, &config.filter);
    let first = source.fetch_page(&first_request).await?;

    let total_pages = first.total_pages(config.page_size);
    if total_pages > config.max_pages {
        error!(
            total_pages,
            max_pages = config.max_pages,
            "page count to visit too large"
        );
        return Err(StatsError::RemoteDataTooLarge {
            max_pages: config.max_pages,
            total_pages,
        });
    }
    info!(
        total = first.total,
        since = window.since,
        until = window.until,
        "total answers for period"
    );
    info!(total_pages, "total page count to visit");

    let mut aggregator = Aggregator::new();
    aggregator.set_total_reported(first.total);
    aggregator.apply_page(&first.items);

    if total_pages > 1 {
        let mut pages = stream::iter(2..=total_pages)
            .map(|page| {
                let request = first_request.for_page(page);
                async move { source.fetch_page(&request).await }
            })
            .buffered(config.concurrency.max(1));

        while let Some(page) = pages.next().await {
            aggregator.apply_page(&page?.items);
        }
    }

    let report = aggregator.into_report();

    info!(
        total_accepted_answers = report.total_accepted_answers,
        accepted_answers_average_score = report.accepted_answers_average_score,
        average_answers_per_question = report.average_answers_per_question,
        top_answers = ?report.top_answers_comments_count.answer_ids(),
        duration_ms = start.elapsed().as_millis(),
        "stats computed"
    );
    Ok(report)
}
