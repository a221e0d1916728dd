//! Same-day grouping of work sessions.
//!
//! The overwork threshold applies per calendar day, so before a session can
//! be classified the tracker must decide which sessions share its day. The
//! rule is an explicit [`DayGrouping`] policy chosen in configuration.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::WorkSession;

/// Policy deciding which sessions share a calendar day.
///
/// # Example
///
/// ```
/// use overwork_tracker::calculation::DayGrouping;
///
/// let policy: DayGrouping = serde_yaml::from_str("start_date").unwrap();
/// assert_eq!(policy, DayGrouping::StartDate);
/// assert_eq!(DayGrouping::default(), DayGrouping::ExactDate);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayGrouping {
    /// A session joins the group of its start date only if it also ends on
    /// that date. A session crossing midnight is never grouped with others
    /// and is evaluated on its own.
    #[default]
    ExactDate,
    /// A session joins the group of its start date regardless of its end.
    StartDate,
}

impl std::fmt::Display for DayGrouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayGrouping::ExactDate => write!(f, "exact_date"),
            DayGrouping::StartDate => write!(f, "start_date"),
        }
    }
}

/// Returns the calendar date a session is reported under.
///
/// Both policies key on the start date; they differ only in membership.
pub fn group_key(session: &WorkSession) -> NaiveDate {
    session.start_date()
}

/// Whether `session` may be grouped together with other sessions on
/// `date` under `policy`.
fn is_member(session: &WorkSession, date: NaiveDate, policy: DayGrouping) -> bool {
    match policy {
        DayGrouping::ExactDate => session.start_date() == date && session.end_date() == date,
        DayGrouping::StartDate => session.start_date() == date,
    }
}

/// Orders sessions by start, then by id so ties are deterministic.
pub(crate) fn sort_by_start(sessions: &mut [WorkSession]) {
    sessions.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
}

/// Collects the same-day group of `session` from `candidates`.
///
/// The result is ordered by start ascending and always contains `session`
/// itself, whether or not it appears in `candidates`. Under
/// [`DayGrouping::ExactDate`] a session that crosses midnight forms a
/// singleton group.
///
/// # Examples
///
/// ```
/// use overwork_tracker::calculation::{same_day_group, DayGrouping};
/// use overwork_tracker::models::WorkSession;
/// use chrono::DateTime;
///
/// let make = |id: &str, start: &str, end: &str| WorkSession {
///     id: id.to_string(),
///     issue_id: "ISS-1".to_string(),
///     start: DateTime::parse_from_rfc3339(start).unwrap(),
///     end: DateTime::parse_from_rfc3339(end).unwrap(),
///     overwork_day: false,
///     description: None,
/// };
///
/// let afternoon = make("b", "2026-01-15T13:00:00+00:00", "2026-01-15T18:00:00+00:00");
/// let morning = make("a", "2026-01-15T08:00:00+00:00", "2026-01-15T12:00:00+00:00");
/// let next_day = make("c", "2026-01-16T08:00:00+00:00", "2026-01-16T12:00:00+00:00");
///
/// let group = same_day_group(
///     &afternoon,
///     &[afternoon.clone(), next_day, morning],
///     DayGrouping::ExactDate,
/// );
/// let ids: Vec<&str> = group.iter().map(|s| s.id.as_str()).collect();
/// assert_eq!(ids, vec!["a", "b"]);
/// ```
pub fn same_day_group(
    session: &WorkSession,
    candidates: &[WorkSession],
    policy: DayGrouping,
) -> Vec<WorkSession> {
    let date = group_key(session);

    if !is_member(session, date, policy) {
        warn!(
            session_id = %session.id,
            start = %session.start,
            end = %session.end,
            grouping = %policy,
            "Session crosses midnight; evaluating it as its own day"
        );
        return vec![session.clone()];
    }

    let mut group: Vec<WorkSession> = candidates
        .iter()
        .filter(|s| s.id != session.id && is_member(s, date, policy))
        .cloned()
        .collect();
    group.push(session.clone());
    sort_by_start(&mut group);
    group
}

/// Partitions sessions into day groups keyed by calendar date.
///
/// Every session lands in at most one group. Under
/// [`DayGrouping::ExactDate`] cross-midnight sessions are left out of the
/// map; use [`same_day_group`] to evaluate them individually.
pub fn group_by_day(
    sessions: &[WorkSession],
    policy: DayGrouping,
) -> BTreeMap<NaiveDate, Vec<WorkSession>> {
    let mut groups: BTreeMap<NaiveDate, Vec<WorkSession>> = BTreeMap::new();
    for session in sessions {
        let date = group_key(session);
        if is_member(session, date, policy) {
            groups.entry(date).or_default().push(session.clone());
        }
    }
    for group in groups.values_mut() {
        sort_by_start(group);
    }
    groups
}
