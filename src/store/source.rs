//! Same-day sibling lookup.
//!
//! The overwork calculator never queries anything itself. Callers hand it a
//! snapshot of the session's day group obtained through [`SessionSource`],
//! which is implemented by the in-memory store and by plain session slices.

use chrono::NaiveDate;

use crate::calculation::{DayGrouping, group_key, same_day_group};
use crate::error::TrackerResult;
use crate::models::WorkSession;

/// A collection of work sessions that can be queried by day and by issue.
pub trait SessionSource {
    /// All sessions whose start falls on `date`, in any order.
    fn sessions_starting_on(&self, date: NaiveDate) -> TrackerResult<Vec<WorkSession>>;

    /// All sessions booked against `issue_id`, ordered by start.
    fn sessions_for_issue(&self, issue_id: &str) -> TrackerResult<Vec<WorkSession>>;

    /// The day group of `session` under `policy`, ordered by start and
    /// always including `session` itself.
    fn same_day_sessions(
        &self,
        session: &WorkSession,
        policy: DayGrouping,
    ) -> TrackerResult<Vec<WorkSession>> {
        let candidates = self.sessions_starting_on(group_key(session))?;
        Ok(same_day_group(session, &candidates, policy))
    }
}

impl SessionSource for [WorkSession] {
    fn sessions_starting_on(&self, date: NaiveDate) -> TrackerResult<Vec<WorkSession>> {
        Ok(self
            .iter()
            .filter(|s| s.start_date() == date)
            .cloned()
            .collect())
    }

    fn sessions_for_issue(&self, issue_id: &str) -> TrackerResult<Vec<WorkSession>> {
        let mut sessions: Vec<WorkSession> = self
            .iter()
            .filter(|s| s.issue_id == issue_id)
            .cloned()
            .collect();
        crate::calculation::sort_by_start(&mut sessions);
        Ok(sessions)
    }
}
