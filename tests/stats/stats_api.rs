use std::sync::Arc;

use stackstats::application::{StatsConfig, StatsService};
use stackstats::domain::answers::QueryWindow;
use stackstats::domain::errors::{StatsError, TransportErrorKind};
use stackstats::domain::stats::StatsReport;
use wiremock::ResponseTemplate;

use crate::helpers::{TestApi, answer, page_body, three_answer_page};

fn window() -> QueryWindow {
    QueryWindow::new(1_657_177_200, 1_657_180_800)
}

fn service(api: &TestApi, config: StatsConfig) -> StatsService {
    StatsService::new(Arc::new(api.client()), config)
}

#[tokio::test]
async fn single_page_report() {
    let api = TestApi::start().await;
    api.mount_page(1, three_answer_page(), 1).await;

    let report = service(&api, api.config()).compute(window()).await.unwrap();

    assert_eq!(report.total_accepted_answers, 2);
    assert_eq!(report.accepted_answers_average_score, 4.0);
    assert_eq!(report.average_answers_per_question, 1.0);
    assert_eq!(
        report.top_answers_comments_count.answer_ids(),
        vec![73265762, 73265744, 73265746]
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json["top_answers_comments_count"],
        serde_json::json!({"73265762": 1, "73265744": 2, "73265746": 0})
    );
}

#[tokio::test]
async fn fetches_each_page_once_and_folds_them_all() {
    let api = TestApi::start().await;
    api.mount_page(
        1,
        page_body(
            5,
            2,
            vec![answer(1, 100, 10, 3, true), answer(1, 101, 2, 0, false)],
        ),
        1,
    )
    .await;
    api.mount_page(
        2,
        page_body(
            5,
            2,
            vec![answer(2, 102, 10, 5, false), answer(3, 103, -1, 1, true)],
        ),
        1,
    )
    .await;
    api.mount_page(3, page_body(5, 2, vec![answer(3, 104, 4, 0, false)]), 1)
        .await;

    let report = service(&api, api.config()).compute(window()).await.unwrap();

    assert_eq!(report.total_accepted_answers, 2);
    assert_eq!(report.accepted_answers_average_score, 4.5);
    assert!((report.average_answers_per_question - 5.0 / 3.0).abs() < f64::EPSILON);
    assert_eq!(
        report.top_answers_comments_count.answer_ids(),
        vec![100, 102, 104, 101, 103]
    );
}

#[tokio::test]
async fn concurrent_pages_give_the_same_report() {
    let api = TestApi::start().await;
    for page in 1..=4u64 {
        let items = vec![
            answer(page, page * 10, (page % 3) as i64, page as u32, page % 2 == 0),
            answer(page + 10, page * 10 + 1, 3, 0, false),
        ];
        api.mount_page(page, page_body(8, 2, items), 2).await;
    }

    let sequential = service(&api, api.config()).compute(window()).await.unwrap();
    let concurrent = service(
        &api,
        StatsConfig {
            concurrency: 4,
            ..api.config()
        },
    )
    .compute(window())
    .await
    .unwrap();

    assert_eq!(sequential, concurrent);
    assert_eq!(sequential.total_accepted_answers, 2);
}

#[tokio::test]
async fn too_many_pages_stops_after_the_first_request() {
    let api = TestApi::start().await;
    api.mount_page(1, page_body(650, 100, vec![answer(1, 1, 1, 0, true)]), 1)
        .await;
    api.mount_page(2, page_body(650, 100, vec![]), 0).await;

    let err = service(&api, api.config())
        .compute(window())
        .await
        .unwrap_err();

    match err {
        StatsError::RemoteDataTooLarge {
            max_pages,
            total_pages,
        } => {
            assert_eq!(max_pages, 5);
            assert_eq!(total_pages, 7);
        }
        other => panic!("expected RemoteDataTooLarge, got {other:?}"),
    }
    assert_eq!(api.request_count().await, 1);
}

#[tokio::test]
async fn raised_page_cap_allows_larger_windows() {
    let api = TestApi::start().await;
    for page in 1..=7u64 {
        api.mount_page(
            page,
            page_body(650, 100, vec![answer(page, page, page as i64, 0, false)]),
            1,
        )
        .await;
    }

    let config = StatsConfig {
        max_pages: 7,
        ..api.config()
    };
    let report = service(&api, config).compute(window()).await.unwrap();

    assert_eq!(report.top_answers_comments_count.len(), 7);
    assert_eq!(report.average_answers_per_question, 650.0 / 7.0);
}

#[tokio::test]
async fn empty_window_is_all_zeroes() {
    let api = TestApi::start().await;
    api.mount_page(1, page_body(0, 100, vec![]), 1).await;

    let report = service(&api, api.config()).compute(window()).await.unwrap();

    assert_eq!(report, StatsReport::default());
}

#[tokio::test]
async fn server_error_mid_run_fails_the_run() {
    let api = TestApi::start().await;
    api.mount_page(1, page_body(150, 100, vec![answer(1, 1, 1, 0, true)]), 1)
        .await;
    api.mount_response(2, ResponseTemplate::new(503), 1).await;

    let err = service(&api, api.config())
        .compute(window())
        .await
        .unwrap_err();

    match err {
        StatsError::Transport(transport) => assert_eq!(transport.kind, TransportErrorKind::Http),
        other => panic!("expected a transport error, got {other:?}"),
    }
}
