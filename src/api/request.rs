//! Request types for the overwork tracker API.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::{Issue, WorkSession};

/// Request body for the `/calculate` endpoint.
///
/// The submitted sessions are evaluated against each other only; nothing
/// is read from or written to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The sessions to evaluate.
    pub sessions: Vec<SessionRequest>,
}

/// Work session in a request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Unique identifier for the session.
    pub id: String,
    /// The issue the session is booked against.
    pub issue_id: String,
    /// Start instant, RFC 3339 with offset.
    pub start: DateTime<FixedOffset>,
    /// End instant, RFC 3339 with offset.
    pub end: DateTime<FixedOffset>,
    /// Whether the whole session counts as overwork.
    #[serde(default)]
    pub overwork_day: bool,
    /// What was worked on.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for `POST /issues`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRequest {
    /// Unique identifier for the issue.
    pub id: String,
    /// Link to the ticket.
    pub url: String,
}

/// Request body for `POST /sessions/overwork-day`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkOverworkRequest {
    /// Sessions to flag as overwork days.
    pub session_ids: Vec<String>,
}

impl From<SessionRequest> for WorkSession {
    fn from(req: SessionRequest) -> Self {
        WorkSession {
            id: req.id,
            issue_id: req.issue_id,
            start: req.start,
            end: req.end,
            overwork_day: req.overwork_day,
            description: req.description,
        }
    }
}

impl From<IssueRequest> for Issue {
    fn from(req: IssueRequest) -> Self {
        Issue {
            id: req.id,
            url: req.url,
        }
    }
}
