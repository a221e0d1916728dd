//! In-memory record store for issues and work sessions.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};
use tracing::{debug, info};

use crate::calculation::{sort_by_start, total_duration};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Issue, WorkSession};

use super::source::SessionSource;

/// Issues and work sessions held in memory.
///
/// Every record is validated on the way in, so anything read back out
/// satisfies `end >= start` and refers to an existing issue.
///
/// # Example
///
/// ```
/// use overwork_tracker::models::{Issue, WorkSession};
/// use overwork_tracker::store::InMemoryStore;
/// use chrono::{DateTime, TimeDelta};
///
/// let mut store = InMemoryStore::new();
/// store.add_issue(Issue {
///     id: "ISS-1".to_string(),
///     url: "https://tracker.example.com/ISS-1".to_string(),
/// })?;
/// store.add_session(WorkSession {
///     id: "ws_001".to_string(),
///     issue_id: "ISS-1".to_string(),
///     start: DateTime::parse_from_rfc3339("2026-01-15T09:00:00+00:00").unwrap(),
///     end: DateTime::parse_from_rfc3339("2026-01-15T12:00:00+00:00").unwrap(),
///     overwork_day: false,
///     description: None,
/// })?;
///
/// assert_eq!(store.issue_total_duration("ISS-1")?, TimeDelta::hours(3));
/// # Ok::<(), overwork_tracker::error::TrackerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    issues: BTreeMap<String, Issue>,
    sessions: BTreeMap<String, WorkSession>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new issue.
    ///
    /// # Errors
    ///
    /// [`TrackerError::InvalidIssue`] if the issue fails validation and
    /// [`TrackerError::DuplicateId`] if its id is taken.
    pub fn add_issue(&mut self, issue: Issue) -> TrackerResult<&Issue> {
        issue.validate()?;
        if self.issues.contains_key(&issue.id) {
            return Err(TrackerError::DuplicateId {
                kind: "issue",
                id: issue.id,
            });
        }
        info!(issue_id = %issue.id, url = %issue.url, "Issue added");
        let id = issue.id.clone();
        Ok(&*self.issues.entry(id).or_insert(issue))
    }

    /// Stores a new work session.
    ///
    /// # Errors
    ///
    /// [`TrackerError::InvalidSession`] if the session fails validation,
    /// [`TrackerError::IssueNotFound`] if its issue does not exist and
    /// [`TrackerError::DuplicateId`] if its id is taken.
    pub fn add_session(&mut self, session: WorkSession) -> TrackerResult<&WorkSession> {
        session.validate()?;
        if !self.issues.contains_key(&session.issue_id) {
            return Err(TrackerError::IssueNotFound {
                id: session.issue_id,
            });
        }
        if self.sessions.contains_key(&session.id) {
            return Err(TrackerError::DuplicateId {
                kind: "session",
                id: session.id,
            });
        }
        info!(
            session_id = %session.id,
            issue_id = %session.issue_id,
            start = %session.start,
            end = %session.end,
            overwork_day = session.overwork_day,
            "Session added"
        );
        let id = session.id.clone();
        Ok(&*self.sessions.entry(id).or_insert(session))
    }

    /// Looks up an issue by id.
    pub fn issue(&self, id: &str) -> TrackerResult<&Issue> {
        self.issues
            .get(id)
            .ok_or_else(|| TrackerError::IssueNotFound { id: id.to_string() })
    }

    /// Looks up a session by id.
    pub fn session(&self, id: &str) -> TrackerResult<&WorkSession> {
        self.sessions
            .get(id)
            .ok_or_else(|| TrackerError::SessionNotFound { id: id.to_string() })
    }

    /// All issues, ordered by id.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.values()
    }

    /// Number of stored sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Flags every listed session as an overwork day.
    ///
    /// Either all ids are applied or none: if any id is unknown the store
    /// is left untouched. Returns the number of sessions whose flag changed.
    ///
    /// # Errors
    ///
    /// [`TrackerError::SessionNotFound`] for the first unknown id.
    pub fn mark_overwork_day<S: AsRef<str>>(&mut self, ids: &[S]) -> TrackerResult<usize> {
        if let Some(missing) = ids
            .iter()
            .map(|id| id.as_ref())
            .find(|id| !self.sessions.contains_key(*id))
        {
            return Err(TrackerError::SessionNotFound {
                id: missing.to_string(),
            });
        }

        let mut updated = 0;
        for id in ids {
            if let Some(session) = self.sessions.get_mut(id.as_ref())
                && !session.overwork_day
            {
                session.overwork_day = true;
                updated += 1;
            }
        }
        info!(requested = ids.len(), updated, "Sessions marked as overwork day");
        Ok(updated)
    }

    /// Sum of plain durations over every session of an issue.
    ///
    /// # Errors
    ///
    /// [`TrackerError::IssueNotFound`] if the issue does not exist.
    pub fn issue_total_duration(&self, issue_id: &str) -> TrackerResult<TimeDelta> {
        self.issue(issue_id)?;
        Ok(total_duration(
            self.sessions
                .values()
                .filter(|s| s.issue_id == issue_id)
                .map(WorkSession::duration),
        ))
    }
}

impl SessionSource for InMemoryStore {
    fn sessions_starting_on(&self, date: NaiveDate) -> TrackerResult<Vec<WorkSession>> {
        let sessions: Vec<WorkSession> = self
            .sessions
            .values()
            .filter(|s| s.start_date() == date)
            .cloned()
            .collect();
        debug!(%date, count = sessions.len(), "Loaded sessions for day");
        Ok(sessions)
    }

    fn sessions_for_issue(&self, issue_id: &str) -> TrackerResult<Vec<WorkSession>> {
        self.issue(issue_id)?;
        let mut sessions: Vec<WorkSession> = self
            .sessions
            .values()
            .filter(|s| s.issue_id == issue_id)
            .cloned()
            .collect();
        sort_by_start(&mut sessions);
        Ok(sessions)
    }
}
