//! End-to-end pipeline tests against a mock upstream host.

use axum::http::StatusCode;
use serde_json::json;

use crate::llm::LlmError;
use crate::server::AppState;
use crate::test_utils::{MockHost, MockResponses};
use crate::types::{PrNumber, RepoId};
use crate::webhooks::{PrAction, PullRequestEvent};

use super::{format_comment, run_review, ReviewError, REVIEW_PROMPT};

const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+fn added() {}\n";

fn opened_event() -> PullRequestEvent {
    PullRequestEvent {
        repo: RepoId::new("org", "repo"),
        action: PrAction::Opened,
        pr_number: PrNumber(42),
    }
}

#[test]
fn comment_carries_the_fixed_header() {
    assert_eq!(format_comment("Nice."), "### 🤖 AI Code Review\n\nNice.");
}

#[tokio::test]
async fn pipeline_runs_fetch_review_publish_in_order() {
    let host = MockHost::start(DIFF, "Consider adding tests.").await;
    let state = AppState::new(host.config(""));

    run_review(&state, &opened_event()).await.unwrap();

    let requests = host.recorded();
    assert_eq!(requests.len(), 3);

    // Diff fetch: URL recomputed from repository and PR number.
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/repos/org/repo/pulls/42");

    // Completion: the diff is the user message, verbatim.
    assert_eq!(requests[1].path, "/openai/v1/chat/completions");
    let completion = &requests[1].body;
    assert_eq!(completion["model"], "test-model");
    assert_eq!(completion["max_tokens"], 1000);
    assert_eq!(completion["temperature"], 0.3);
    assert_eq!(completion["messages"][0]["role"], "system");
    assert_eq!(completion["messages"][0]["content"], REVIEW_PROMPT);
    assert_eq!(completion["messages"][1]["role"], "user");
    assert_eq!(completion["messages"][1]["content"], DIFF);

    // Comment: posted on the issues endpoint with the fixed header.
    assert_eq!(requests[2].method, "POST");
    assert_eq!(requests[2].path, "/repos/org/repo/issues/42/comments");
    let comment = requests[2].body["body"].as_str().unwrap();
    assert!(comment.starts_with("### 🤖 AI Code Review\n\n"));
    assert!(comment.ends_with("Consider adding tests."));
}

#[tokio::test]
async fn failed_diff_fetch_halts_the_pipeline() {
    let responses = MockResponses {
        diff_status: StatusCode::INTERNAL_SERVER_ERROR,
        ..MockResponses::ok("", "unreachable")
    };
    let host = MockHost::start_with(responses).await;
    let state = AppState::new(host.config(""));

    let result = run_review(&state, &opened_event()).await;
    assert!(matches!(result, Err(ReviewError::FetchDiff(_))));

    // The completion API and the comment endpoint were never reached.
    let requests = host.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/repos/org/repo/pulls/42");
}

#[tokio::test]
async fn empty_choices_prevents_the_comment() {
    let responses = MockResponses {
        completion_body: json!({ "choices": [] }),
        ..MockResponses::ok(DIFF, "unused")
    };
    let host = MockHost::start_with(responses).await;
    let state = AppState::new(host.config(""));

    let result = run_review(&state, &opened_event()).await;
    assert!(matches!(
        result,
        Err(ReviewError::GenerateReview(LlmError::EmptyChoices))
    ));

    let requests = host.recorded();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].path, "/openai/v1/chat/completions");
}

#[tokio::test]
async fn comment_failure_surfaces_as_publish_error() {
    let responses = MockResponses {
        comment_status: StatusCode::FORBIDDEN,
        ..MockResponses::ok(DIFF, "fine")
    };
    let host = MockHost::start_with(responses).await;
    let state = AppState::new(host.config(""));

    let result = run_review(&state, &opened_event()).await;
    assert!(matches!(result, Err(ReviewError::PostComment(_))));

    // All three stages ran; only the last one failed.
    assert_eq!(host.recorded().len(), 3);
}
