//! Integration tests for the overwork tracker HTTP API.
//!
//! Covers:
//! - Stateless batch calculation (`/calculate`)
//! - Issue and session records
//! - Issue reports and per-session lines
//! - Flagging overwork days
//! - Error cases

use std::str::FromStr;
use std::sync::LazyLock;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use overwork_tracker::api::{AppState, create_router};
use overwork_tracker::config::ConfigLoader;
use overwork_tracker::logging::TEST_LOGGING;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    LazyLock::force(&TEST_LOGGING);
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serialized as string")).unwrap()
}

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn session(id: &str, issue_id: &str, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "issue_id": issue_id,
        "start": start,
        "end": end
    })
}

async fn create_issue(router: &Router, id: &str) {
    let (status, _) = send(
        router,
        "POST",
        "/issues",
        Some(json!({
            "id": id,
            "url": format!("https://tracker.example/{id}")
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn create_session(router: &Router, body: Value) -> (StatusCode, Value) {
    send(router, "POST", "/sessions", Some(body)).await
}

fn line_for<'a>(lines: &'a Value, session_id: &str) -> &'a Value {
    lines
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["session_id"] == session_id)
        .unwrap_or_else(|| panic!("no line for {session_id}"))
}

// =============================================================================
// Stateless calculation
// =============================================================================

#[tokio::test]
async fn test_calculate_single_ten_hour_session() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [session("ws_1", "ISS-1", "2026-01-15T08:00:00+01:00", "2026-01-15T18:00:00+01:00")]
    });

    let (status, result) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let line = line_for(&result["lines"], "ws_1");
    assert_eq!(line["worked"], "10:00");
    assert_eq!(line["overwork"], "01:00");
    assert_eq!(line["classification"], "straddles");
    assert_eq!(decimal(&line["overwork_hours"]), d("1"));

    // 10h * 30.00 + 1h * 30.00 * 0.40
    assert_eq!(decimal(&result["totals"]["regular_amount"]), d("300.00"));
    assert_eq!(decimal(&result["totals"]["premium_amount"]), d("12.00"));
    assert_eq!(decimal(&result["totals"]["total_amount"]), d("312.00"));
    assert_eq!(result["totals"]["currency"], "EUR");
    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_calculate_two_five_hour_sessions() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [
            session("ws_b", "ISS-1", "2026-01-15T13:00:00+01:00", "2026-01-15T18:00:00+01:00"),
            session("ws_a", "ISS-1", "2026-01-15T07:00:00+01:00", "2026-01-15T12:00:00+01:00")
        ]
    });

    let (status, result) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    // Lines come back in chronological order
    let lines = result["lines"].as_array().unwrap();
    assert_eq!(lines[0]["session_id"], "ws_a");
    assert_eq!(lines[1]["session_id"], "ws_b");

    assert_eq!(lines[0]["overwork"], "00:00");
    assert_eq!(lines[0]["classification"], "before_threshold");
    assert_eq!(lines[1]["overwork"], "01:00");
    assert_eq!(lines[1]["classification"], "straddles");
    assert_eq!(result["totals"]["worked"], "10:00");
    assert_eq!(result["totals"]["overwork"], "01:00");
}

#[tokio::test]
async fn test_calculate_nine_then_one() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [
            session("ws_1", "ISS-1", "2026-01-15T08:00:00Z", "2026-01-15T17:00:00Z"),
            session("ws_2", "ISS-2", "2026-01-15T18:00:00Z", "2026-01-15T19:00:00Z")
        ]
    });

    let (status, result) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(line_for(&result["lines"], "ws_1")["overwork"], "00:00");
    let second = line_for(&result["lines"], "ws_2");
    assert_eq!(second["overwork"], "01:00");
    assert_eq!(second["classification"], "after_threshold");
}

#[tokio::test]
async fn test_calculate_flagged_session_is_all_overwork() {
    let router = create_router_for_test();
    let mut flagged = session("ws_1", "ISS-1", "2026-01-17T10:00:00Z", "2026-01-17T12:30:00Z");
    flagged["overwork_day"] = json!(true);

    let (status, result) = send(
        &router,
        "POST",
        "/calculate",
        Some(json!({ "sessions": [flagged] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let line = line_for(&result["lines"], "ws_1");
    assert_eq!(line["overwork"], "02:30");
    assert_eq!(line["classification"], "flagged_day");
    // 2.5h * 30.00 * 1.40
    assert_eq!(decimal(&line["amount"]), d("105.00"));
}

#[tokio::test]
async fn test_calculate_under_threshold_has_no_overwork() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [
            session("ws_1", "ISS-1", "2026-01-15T08:00:00Z", "2026-01-15T12:00:00Z"),
            session("ws_2", "ISS-1", "2026-01-15T13:00:00Z", "2026-01-15T17:00:00Z")
        ]
    });

    let (_, result) = send(&router, "POST", "/calculate", Some(body)).await;
    for line in result["lines"].as_array().unwrap() {
        assert_eq!(line["overwork"], "00:00");
        assert_eq!(line["classification"], "under_threshold");
    }
    assert_eq!(decimal(&result["totals"]["premium_amount"]), d("0"));
}

#[tokio::test]
async fn test_calculate_cross_midnight_warns() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [session("ws_night", "ISS-1", "2026-01-15T20:00:00Z", "2026-01-16T07:00:00Z")]
    });

    let (status, result) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "CROSS_MIDNIGHT_SESSION");

    // Evaluated as its own day: 11h worked, 2h overwork
    let line = line_for(&result["lines"], "ws_night");
    assert_eq!(line["worked"], "11:00");
    assert_eq!(line["overwork"], "02:00");
}

#[tokio::test]
async fn test_calculate_audit_trace_shape() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [
            session("ws_1", "ISS-1", "2026-01-15T08:00:00Z", "2026-01-15T12:00:00Z"),
            session("ws_2", "ISS-1", "2026-01-15T13:00:00Z", "2026-01-15T19:00:00Z")
        ]
    });

    let (_, result) = send(&router, "POST", "/calculate", Some(body)).await;
    let steps = result["audit_trace"]["steps"].as_array().unwrap();

    // One allocation step per session plus the valuation step
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["rule_id"], "daily_overwork_allocation");
    assert_eq!(steps[2]["rule_id"], "overwork_valuation");
    assert_eq!(steps[2]["step_number"], 3);
    assert!(result["calculation_id"].as_str().is_some());
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_calculate_end_before_start_returns_400() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [session("ws_1", "ISS-1", "2026-01-15T18:00:00Z", "2026-01-15T08:00:00Z")]
    });

    let (status, error) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_SESSION");
}

#[tokio::test]
async fn test_calculate_duplicate_session_ids_returns_409() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [
            session("ws_1", "ISS-1", "2026-01-15T08:00:00Z", "2026-01-15T10:00:00Z"),
            session("ws_1", "ISS-1", "2026-01-15T11:00:00Z", "2026-01-15T12:00:00Z")
        ]
    });

    let (status, error) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DUPLICATE_ID");
}

#[tokio::test]
async fn test_calculate_without_rate_returns_400() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [session("ws_1", "ISS-1", "2024-06-03T08:00:00Z", "2024-06-03T10:00:00Z")]
    });

    let (status, error) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "RATE_NOT_FOUND");
}

#[tokio::test]
async fn test_calculate_empty_batch() {
    let router = create_router_for_test();
    let (status, result) = send(&router, "POST", "/calculate", Some(json!({ "sessions": [] }))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["lines"].as_array().unwrap().is_empty());
    assert_eq!(result["totals"]["worked"], "00:00");
    assert_eq!(decimal(&result["totals"]["total_amount"]), d("0"));
}

// =============================================================================
// Records
// =============================================================================

#[tokio::test]
async fn test_create_issue_returns_201() {
    let router = create_router_for_test();
    let (status, issue) = send(
        &router,
        "POST",
        "/issues",
        Some(json!({ "id": "ISS-7", "url": "https://tracker.example/7" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(issue["id"], "ISS-7");
    assert_eq!(issue["url"], "https://tracker.example/7");
}

#[tokio::test]
async fn test_duplicate_issue_returns_409() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;

    let (status, error) = send(
        &router,
        "POST",
        "/issues",
        Some(json!({ "id": "ISS-1", "url": "https://tracker.example/other" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DUPLICATE_ID");
}

#[tokio::test]
async fn test_issue_with_empty_url_returns_400() {
    let router = create_router_for_test();
    let (status, error) = send(
        &router,
        "POST",
        "/issues",
        Some(json!({ "id": "ISS-1", "url": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_ISSUE");
}

#[tokio::test]
async fn test_issue_with_non_url_returns_400() {
    let router = create_router_for_test();
    let (status, error) = send(
        &router,
        "POST",
        "/issues",
        Some(json!({ "id": "ISS-1", "url": "not a url at all" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_ISSUE");

    // Nothing was stored
    let (status, _) = send(&router, "GET", "/issues/ISS-1/report", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_description_limit() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;

    let mut at_limit = session("ws_1", "ISS-1", "2026-01-15T08:00:00Z", "2026-01-15T10:00:00Z");
    at_limit["description"] = json!("x".repeat(4000));
    let (status, _) = create_session(&router, at_limit).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut over_limit = session("ws_2", "ISS-1", "2026-01-15T11:00:00Z", "2026-01-15T12:00:00Z");
    over_limit["description"] = json!("x".repeat(4001));
    let (status, error) = create_session(&router, over_limit).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_SESSION");
}

#[tokio::test]
async fn test_session_line_carries_description() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;

    let mut body = session("ws_1", "ISS-1", "2026-01-15T08:00:00Z", "2026-01-15T10:00:00Z");
    body["description"] = json!("Reproduce login bug");
    let (status, created) = create_session(&router, body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["description"], "Reproduce login bug");

    let (_, line) = send(&router, "GET", "/sessions/ws_1", None).await;
    assert_eq!(line["description"], "Reproduce login bug");
}

#[tokio::test]
async fn test_session_for_unknown_issue_returns_404() {
    let router = create_router_for_test();
    let (status, error) = create_session(
        &router,
        session("ws_1", "ISS-404", "2026-01-15T08:00:00Z", "2026-01-15T10:00:00Z"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "ISSUE_NOT_FOUND");
}

#[tokio::test]
async fn test_session_end_before_start_returns_400() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;

    let (status, error) = create_session(
        &router,
        session("ws_1", "ISS-1", "2026-01-15T10:00:00Z", "2026-01-15T08:00:00Z"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_SESSION");
}

#[tokio::test]
async fn test_session_line_sees_sessions_of_other_issues() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;
    create_issue(&router, "ISS-2").await;

    let (status, _) = create_session(
        &router,
        session("ws_1", "ISS-1", "2026-01-15T07:00:00+01:00", "2026-01-15T12:00:00+01:00"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = create_session(
        &router,
        session("ws_2", "ISS-2", "2026-01-15T13:00:00+01:00", "2026-01-15T18:00:00+01:00"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, line) = send(&router, "GET", "/sessions/ws_2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(line["overwork"], "01:00");
    assert_eq!(line["date"], "2026-01-15");

    let (_, line) = send(&router, "GET", "/sessions/ws_1", None).await;
    assert_eq!(line["overwork"], "00:00");
}

#[tokio::test]
async fn test_unknown_session_returns_404() {
    let router = create_router_for_test();
    let (status, error) = send(&router, "GET", "/sessions/missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "SESSION_NOT_FOUND");
}

// =============================================================================
// Issue reports
// =============================================================================

#[tokio::test]
async fn test_issue_report_totals() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;

    for body in [
        session("ws_1", "ISS-1", "2026-01-15T08:00:00Z", "2026-01-15T18:00:00Z"),
        session("ws_2", "ISS-1", "2026-01-16T09:00:00Z", "2026-01-16T11:00:00Z"),
    ] {
        let (status, _) = create_session(&router, body).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = send(&router, "GET", "/issues/ISS-1/report", None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(report["issue"]["id"], "ISS-1");
    assert_eq!(report["lines"].as_array().unwrap().len(), 2);
    assert_eq!(report["totals"]["worked"], "12:00");
    assert_eq!(report["totals"]["overwork"], "01:00");
    // 12h * 30.00 + 1h * 30.00 * 0.40
    assert_eq!(decimal(&report["totals"]["total_amount"]), d("372.00"));
}

#[tokio::test]
async fn test_issue_report_without_sessions_is_zero() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;

    let (status, report) = send(&router, "GET", "/issues/ISS-1/report", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(report["lines"].as_array().unwrap().is_empty());
    assert_eq!(report["totals"]["worked"], "00:00");
    assert_eq!(decimal(&report["totals"]["total_amount"]), d("0"));
}

#[tokio::test]
async fn test_unknown_issue_report_returns_404() {
    let router = create_router_for_test();
    let (status, error) = send(&router, "GET", "/issues/ISS-404/report", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "ISSUE_NOT_FOUND");
}

// =============================================================================
// Overwork days
// =============================================================================

#[tokio::test]
async fn test_mark_overwork_day() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;
    let (status, _) = create_session(
        &router,
        session("ws_1", "ISS-1", "2026-01-17T10:00:00Z", "2026-01-17T12:00:00Z"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, before) = send(&router, "GET", "/sessions/ws_1", None).await;
    assert_eq!(before["overwork"], "00:00");

    let (status, body) = send(
        &router,
        "POST",
        "/sessions/overwork-day",
        Some(json!({ "session_ids": ["ws_1"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);

    let (_, after) = send(&router, "GET", "/sessions/ws_1", None).await;
    assert_eq!(after["overwork_day"], true);
    assert_eq!(after["overwork"], "02:00");

    // Already flagged: nothing changes
    let (_, body) = send(
        &router,
        "POST",
        "/sessions/overwork-day",
        Some(json!({ "session_ids": ["ws_1"] })),
    )
    .await;
    assert_eq!(body["updated"], 0);
}

#[tokio::test]
async fn test_mark_overwork_day_unknown_id_changes_nothing() {
    let router = create_router_for_test();
    create_issue(&router, "ISS-1").await;
    let (status, _) = create_session(
        &router,
        session("ws_1", "ISS-1", "2026-01-17T10:00:00Z", "2026-01-17T12:00:00Z"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(
        &router,
        "POST",
        "/sessions/overwork-day",
        Some(json!({ "session_ids": ["ws_1", "ws_missing"] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "SESSION_NOT_FOUND");

    let (_, line) = send(&router, "GET", "/sessions/ws_1", None).await;
    assert_eq!(line["overwork_day"], false);
}

// =============================================================================
// Request errors
// =============================================================================

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [{ "id": "ws_1", "start": "2026-01-15T08:00:00Z", "end": "2026-01-15T10:00:00Z" }]
    });

    let (status, error) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("issue_id"));
}

#[tokio::test]
async fn test_timestamp_without_offset_returns_400() {
    let router = create_router_for_test();
    let body = json!({
        "sessions": [session("ws_1", "ISS-1", "2026-01-15T08:00:00", "2026-01-15T10:00:00")]
    });

    let (status, error) = send(&router, "POST", "/calculate", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}
