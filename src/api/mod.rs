//! HTTP API for the overwork tracker.
//!
//! Exposes stateless batch calculation plus issue and session records
//! held in an in-memory store.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, IssueRequest, MarkOverworkRequest, SessionRequest};
pub use response::{ApiError, ApiErrorResponse, MarkOverworkResponse};
pub use state::AppState;
