//! Work session model.
//!
//! A work session is a single stretch of work booked against an issue,
//! bounded by two timezone-aware instants.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::calculation::session_duration;
use crate::error::{TrackerError, TrackerResult};

/// Maximum length of a session description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 4000;

/// A single recorded stretch of work against an issue.
///
/// Calendar dates are taken in the offset each instant was recorded with,
/// so a session logged as `2026-01-16T08:00:00+10:00` belongs to the 16th
/// even though that instant is still the 15th in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// Unique identifier for the session.
    pub id: String,
    /// The issue this session is booked against.
    pub issue_id: String,
    /// When the work started.
    pub start: DateTime<FixedOffset>,
    /// When the work ended. Must not be before `start`.
    pub end: DateTime<FixedOffset>,
    /// Manual override: the whole session counts as overwork.
    #[serde(default)]
    pub overwork_day: bool,
    /// What was worked on, at most [`MAX_DESCRIPTION_LEN`] characters.
    #[serde(default)]
    pub description: Option<String>,
}

impl WorkSession {
    /// Returns the plain worked duration, `end - start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use overwork_tracker::models::WorkSession;
    /// use chrono::{DateTime, TimeDelta};
    ///
    /// let session = WorkSession {
    ///     id: "ws_001".to_string(),
    ///     issue_id: "ISS-1".to_string(),
    ///     start: DateTime::parse_from_rfc3339("2026-01-15T09:00:00+00:00").unwrap(),
    ///     end: DateTime::parse_from_rfc3339("2026-01-15T17:30:00+00:00").unwrap(),
    ///     overwork_day: false,
    ///     description: None,
    /// };
    /// assert_eq!(session.duration(), TimeDelta::minutes(510));
    /// ```
    pub fn duration(&self) -> TimeDelta {
        session_duration(self.start, self.end)
    }

    /// Calendar date of `start` in its recorded offset.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Calendar date of `end` in its recorded offset.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Whether the session ends on a later calendar date than it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.start_date() != self.end_date()
    }

    /// Checks the invariants a session must satisfy before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidSession`] if the id or issue id is
    /// blank, if `end` is before `start`, or if the description is too long.
    pub fn validate(&self) -> TrackerResult<()> {
        if self.id.trim().is_empty() {
            return Err(TrackerError::InvalidSession {
                session_id: self.id.clone(),
                message: "id must not be empty".to_string(),
            });
        }
        if self.issue_id.trim().is_empty() {
            return Err(TrackerError::InvalidSession {
                session_id: self.id.clone(),
                message: "issue_id must not be empty".to_string(),
            });
        }
        if self.end < self.start {
            return Err(TrackerError::InvalidSession {
                session_id: self.id.clone(),
                message: format!("end {} is before start {}", self.end, self.start),
            });
        }
        if let Some(description) = &self.description {
            let len = description.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(TrackerError::InvalidSession {
                    session_id: self.id.clone(),
                    message: format!(
                        "description of {} characters exceeds the {} character limit",
                        len, MAX_DESCRIPTION_LEN
                    ),
                });
            }
        }
        Ok(())
    }
}
