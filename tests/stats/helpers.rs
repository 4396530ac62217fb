use std::process::{Command, Output};
use std::time::Duration;

use serde_json::{Value, json};
use stackstats::application::StatsConfig;
use stackstats::infrastructure::client::StackExchangeClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ANSWERS_PATH: &str = "/2.3/answers";

/// A mock Stack Exchange API serving scripted answer pages.
pub struct TestApi {
    pub server: MockServer,
}

impl TestApi {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn answers_url(&self) -> String {
        format!("{}{}", self.server.uri(), ANSWERS_PATH)
    }

    pub fn config(&self) -> StatsConfig {
        StatsConfig {
            url: self.answers_url(),
            ..StatsConfig::default()
        }
    }

    pub fn client(&self) -> StackExchangeClient {
        StackExchangeClient::from_url(&self.answers_url(), Duration::from_secs(2))
            .expect("Failed to build client")
    }

    /// Serve `body` for `page`, and require it to be requested exactly `times` times.
    pub async fn mount_page(&self, page: u64, body: Value, times: u64) {
        self.mount_response(page, ResponseTemplate::new(200).set_body_json(body), times)
            .await;
    }

    pub async fn mount_response(&self, page: u64, response: ResponseTemplate, times: u64) {
        Mock::given(method("GET"))
            .and(path(ANSWERS_PATH))
            .and(query_param("page", page.to_string()))
            .respond_with(response)
            .expect(times)
            .named(format!("answers page {page}"))
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

pub fn answer(
    question_id: u64,
    answer_id: u64,
    score: i64,
    comment_count: u32,
    accepted: bool,
) -> Value {
    json!({
        "question_id": question_id,
        "answer_id": answer_id,
        "score": score,
        "comment_count": comment_count,
        "is_accepted": accepted,
    })
}

pub fn page_body(total: u64, page_size: u32, items: Vec<Value>) -> Value {
    json!({
        "items": items,
        "has_more": false,
        "quota_max": 300,
        "quota_remaining": 299,
        "page_size": page_size,
        "total": total,
    })
}

/// Accepted 5, accepted 3, unaccepted 7, each on its own question.
pub fn three_answer_page() -> Value {
    page_body(
        3,
        100,
        vec![
            answer(73265700, 73265744, 5, 2, true),
            answer(73265701, 73265746, 3, 0, true),
            answer(73265702, 73265762, 7, 1, false),
        ],
    )
}

/// The binary with every variable it reads from the environment cleared.
pub fn stackstats_command(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_stackstats"));
    command
        .args(args)
        .env_remove("STACKSTATS_URL")
        .env_remove("STACKSTATS_FILTER")
        .env_remove("STACKSTATS_MAX_PAGES")
        .env_remove("STACKSTATS_SITE")
        .env_remove("STACKSTATS_CONCURRENCY")
        .env_remove("STACKSTATS_OUTPUT_FORMAT")
        .env_remove("STACKSTATS_ENABLE_LOGGING")
        .env_remove("RUST_LOG")
        .env_remove("RUST_LOG_FORMAT");
    command
}

pub fn run_stackstats(args: &[&str]) -> Output {
    stackstats_command(args)
        .output()
        .expect("Failed to run stackstats binary")
}

/// Run the binary off the async runtime so the mock server keeps serving.
pub async fn run_stackstats_async(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_stackstats(&args)
    })
    .await
    .expect("stackstats task panicked")
}

pub async fn run_stackstats_with_log_filter(args: Vec<String>, filter: &'static str) -> Output {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        stackstats_command(&args)
            .env("RUST_LOG", filter)
            .output()
            .expect("Failed to run stackstats binary")
    })
    .await
    .expect("stackstats task panicked")
}
