//! Error types for the overwork tracker.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition the tracker can report.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the overwork tracker.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle errors consistently from the store up to the HTTP layer.
///
/// # Example
///
/// ```
/// use overwork_tracker::error::TrackerError;
///
/// let error = TrackerError::ConfigNotFound {
///     path: "/missing/tracker.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tracker.yaml");
/// ```
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No hourly rate is effective on the requested date.
    #[error("No hourly rate effective on {date}")]
    RateNotFound {
        /// The date for which the rate was requested.
        date: NaiveDate,
    },

    /// A work session was invalid or contained inconsistent data.
    #[error("Invalid session '{session_id}': {message}")]
    InvalidSession {
        /// The ID of the invalid session.
        session_id: String,
        /// A description of what made the session invalid.
        message: String,
    },

    /// An issue record was invalid.
    #[error("Invalid issue field '{field}': {message}")]
    InvalidIssue {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No session with the given ID exists in the store.
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// The session ID that was looked up.
        id: String,
    },

    /// No issue with the given ID exists in the store.
    #[error("Issue not found: {id}")]
    IssueNotFound {
        /// The issue ID that was looked up.
        id: String,
    },

    /// A record with the same ID already exists.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// The kind of record ("issue" or "session").
        kind: &'static str,
        /// The conflicting ID.
        id: String,
    },
}

/// A type alias for Results that return TrackerError.
pub type TrackerResult<T> = Result<T, TrackerError>;
