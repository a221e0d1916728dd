//! HTTP request handlers for the overwork tracker API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_issue_report, calculate_batch, evaluate_session};
use crate::error::TrackerError;
use crate::models::{Issue, WorkSession};

use super::request::{CalculationRequest, IssueRequest, MarkOverworkRequest, SessionRequest};
use super::response::{ApiError, ApiErrorResponse, MarkOverworkResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/issues", post(create_issue_handler))
        .route("/issues/:id/report", get(issue_report_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/overwork-day", post(mark_overwork_handler))
        .route("/sessions/:id", get(session_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: TrackerError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a body extraction failure onto the API error format.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for `POST /calculate`.
///
/// Evaluates a self-contained batch of sessions. The store is not touched.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let sessions: Vec<WorkSession> = request.sessions.into_iter().map(Into::into).collect();

    let start_time = Instant::now();
    match calculate_batch(&sessions, state.config().config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                sessions_count = sessions.len(),
                overwork = %result.totals.overwork,
                total_amount = %result.totals.total_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `POST /issues`.
async fn create_issue_handler(
    State(state): State<AppState>,
    payload: Result<Json<IssueRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let issue: Issue = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let mut store = state.store().write().await;
    match store.add_issue(issue) {
        Ok(issue) => {
            info!(correlation_id = %correlation_id, issue_id = %issue.id, "Issue created");
            json_response(StatusCode::CREATED, issue)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `GET /issues/{id}/report`.
async fn issue_report_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, issue_id = %id, "Building issue report");

    let store = state.store().read().await;
    let result = store
        .issue(&id)
        .and_then(|issue| build_issue_report(issue, &*store, state.config().config()));

    match result {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `POST /sessions`.
async fn create_session_handler(
    State(state): State<AppState>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let session: WorkSession = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let mut store = state.store().write().await;
    match store.add_session(session) {
        Ok(session) => {
            info!(
                correlation_id = %correlation_id,
                session_id = %session.id,
                issue_id = %session.issue_id,
                "Session recorded"
            );
            json_response(StatusCode::CREATED, session)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `GET /sessions/{id}`.
///
/// Returns the session's report line, evaluated against its current day
/// group in the store.
async fn session_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();

    let store = state.store().read().await;
    let result = store
        .session(&id)
        .and_then(|session| evaluate_session(session, &*store, state.config().config(), 1));

    match result {
        Ok(evaluation) => json_response(StatusCode::OK, evaluation.line),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `POST /sessions/overwork-day`.
async fn mark_overwork_handler(
    State(state): State<AppState>,
    payload: Result<Json<MarkOverworkRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let mut store = state.store().write().await;
    match store.mark_overwork_day(request.session_ids.as_slice()) {
        Ok(updated) => {
            info!(
                correlation_id = %correlation_id,
                requested = request.session_ids.len(),
                updated,
                "Sessions flagged as overwork days"
            );
            json_response(StatusCode::OK, MarkOverworkResponse { updated })
        }
        Err(err) => error_response(correlation_id, err),
    }
}
