//! Overwork allocation.
//!
//! Within a calendar day, the first `threshold` (9 hours by default) of
//! accumulated work is ordinary time. Everything after the instant at which
//! the running total reaches the threshold is overwork. A session that
//! straddles that instant is split: only the part after it is overwork.
//! A session carrying the overwork-day flag is overwork in full.

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::models::{AuditStep, OverworkClass, WorkSession};

use super::duration::{format_hours_minutes, total_duration};

/// Default daily threshold, in hours, beyond which work counts as overwork.
pub const DEFAULT_DAILY_THRESHOLD_HOURS: i64 = 9;

/// Returns [`DEFAULT_DAILY_THRESHOLD_HOURS`] as a duration.
pub fn default_daily_threshold() -> TimeDelta {
    TimeDelta::hours(DEFAULT_DAILY_THRESHOLD_HOURS)
}

/// The result of allocating overwork to one session, with its audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverworkDetection {
    /// The session that was evaluated.
    pub session_id: String,
    /// The session's plain duration.
    pub worked: TimeDelta,
    /// The portion of the session that is overwork.
    pub overwork: TimeDelta,
    /// Sum of all durations in the session's day group.
    pub day_total: TimeDelta,
    /// When the day's running total reached the threshold, if it did.
    pub threshold_instant: Option<DateTime<FixedOffset>>,
    /// How the session relates to the threshold.
    pub classification: OverworkClass,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

struct Allocation {
    overwork: TimeDelta,
    day_total: TimeDelta,
    threshold_instant: Option<DateTime<FixedOffset>>,
    classification: OverworkClass,
}

/// Finds the instant at which cumulative worked time reaches `threshold`.
///
/// Walks `same_day` in order, accumulating durations. For the first session
/// whose duration pushes the running total past `threshold`, the instant is
/// that session's start plus whatever was still missing to reach the
/// threshold. Returns `None` if the running total never exceeds it.
///
/// `same_day` must be ordered by start ascending.
///
/// # Examples
///
/// ```
/// use overwork_tracker::calculation::{threshold_crossing_instant, default_daily_threshold};
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
/// // 5h then 5h: the threshold is reached 4h into the second session
/// let day = vec![
///     make("a", "2026-01-15T06:00:00+00:00", "2026-01-15T11:00:00+00:00"),
///     make("b", "2026-01-15T12:00:00+00:00", "2026-01-15T17:00:00+00:00"),
/// ];
/// let instant = threshold_crossing_instant(&day, default_daily_threshold()).unwrap();
/// assert_eq!(instant, DateTime::parse_from_rfc3339("2026-01-15T16:00:00+00:00").unwrap());
/// ```
pub fn threshold_crossing_instant(
    same_day: &[WorkSession],
    threshold: TimeDelta,
) -> Option<DateTime<FixedOffset>> {
    let mut running = TimeDelta::zero();
    for s in same_day {
        let worked = s.duration();
        if running + worked > threshold {
            return Some(s.start + (threshold - running));
        }
        running = running + worked;
    }
    None
}

fn allocate(session: &WorkSession, same_day: &[WorkSession], threshold: TimeDelta) -> Allocation {
    let day_total = total_duration(same_day.iter().map(WorkSession::duration));

    if session.overwork_day {
        return Allocation {
            overwork: session.duration(),
            day_total,
            threshold_instant: None,
            classification: OverworkClass::FlaggedDay,
        };
    }

    if day_total <= threshold {
        return Allocation {
            overwork: TimeDelta::zero(),
            day_total,
            threshold_instant: None,
            classification: OverworkClass::UnderThreshold,
        };
    }

    let Some(instant) = threshold_crossing_instant(same_day, threshold) else {
        return Allocation {
            overwork: TimeDelta::zero(),
            day_total,
            threshold_instant: None,
            classification: OverworkClass::NoCrossing,
        };
    };

    let (overwork, classification) = if session.start >= instant {
        (session.duration(), OverworkClass::AfterThreshold)
    } else if session.end > instant {
        (session.end - instant, OverworkClass::Straddles)
    } else {
        (TimeDelta::zero(), OverworkClass::BeforeThreshold)
    };

    Allocation {
        overwork,
        day_total,
        threshold_instant: Some(instant),
        classification,
    }
}

/// Returns the overwork duration attributable to `session`.
///
/// `same_day` is the session's day group ordered by start ascending and
/// must include `session` itself (see
/// [`same_day_group`](super::same_day_group)). The function is pure: the
/// same inputs always give the same result.
///
/// - A flagged session is overwork in full.
/// - If the day's total does not exceed `threshold`, nothing is overwork.
/// - Otherwise the session is compared against the threshold-crossing
///   instant `T`: fully after `T` counts in full, straddling `T` counts
///   `end - T`, and ending at or before `T` counts nothing.
///
/// # Examples
///
/// ```
/// use overwork_tracker::calculation::{compute_overwork, default_daily_threshold};
/// use overwork_tracker::models::WorkSession;
/// use chrono::{DateTime, TimeDelta};
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
/// let long_day = make("a", "2026-01-15T08:00:00+00:00", "2026-01-15T18:00:00+00:00");
/// let group = vec![long_day.clone()];
/// assert_eq!(
///     compute_overwork(&long_day, &group, default_daily_threshold()),
///     TimeDelta::hours(1)
/// );
/// ```
pub fn compute_overwork(
    session: &WorkSession,
    same_day: &[WorkSession],
    threshold: TimeDelta,
) -> TimeDelta {
    allocate(session, same_day, threshold).overwork
}

/// Allocates overwork to `session` and records the decision as an audit step.
///
/// The `overwork` field always equals [`compute_overwork`] for the same inputs.
pub fn detect_overwork(
    session: &WorkSession,
    same_day: &[WorkSession],
    threshold: TimeDelta,
    step_number: u32,
) -> OverworkDetection {
    let allocation = allocate(session, same_day, threshold);
    let worked = session.duration();

    let reasoning = match allocation.classification {
        OverworkClass::FlaggedDay => format!(
            "Session is flagged as an overwork day; all {} counts as overwork",
            format_hours_minutes(worked)
        ),
        OverworkClass::UnderThreshold => format!(
            "Day total {} does not exceed the {} threshold, no overwork",
            format_hours_minutes(allocation.day_total),
            format_hours_minutes(threshold)
        ),
        OverworkClass::NoCrossing => format!(
            "Day total {} exceeds the {} threshold but no crossing instant was found, no overwork",
            format_hours_minutes(allocation.day_total),
            format_hours_minutes(threshold)
        ),
        OverworkClass::BeforeThreshold => format!(
            "Session ends at or before the threshold was reached, no overwork (day total {})",
            format_hours_minutes(allocation.day_total)
        ),
        OverworkClass::Straddles => format!(
            "Threshold was reached inside the session; {} after it counts as overwork",
            format_hours_minutes(allocation.overwork)
        ),
        OverworkClass::AfterThreshold => format!(
            "Session starts after the threshold was reached; all {} counts as overwork",
            format_hours_minutes(worked)
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_overwork_allocation".to_string(),
        rule_name: "Daily Overwork Allocation".to_string(),
        input: serde_json::json!({
            "session_id": session.id,
            "start": session.start.to_rfc3339(),
            "end": session.end.to_rfc3339(),
            "overwork_day": session.overwork_day,
            "day_sessions": same_day.len(),
            "day_total": format_hours_minutes(allocation.day_total),
            "threshold": format_hours_minutes(threshold)
        }),
        output: serde_json::json!({
            "classification": allocation.classification,
            "threshold_instant": allocation.threshold_instant.map(|t| t.to_rfc3339()),
            "overwork": format_hours_minutes(allocation.overwork)
        }),
        reasoning,
    };

    OverworkDetection {
        session_id: session.id.clone(),
        worked,
        overwork: allocation.overwork,
        day_total: allocation.day_total,
        threshold_instant: allocation.threshold_instant,
        classification: allocation.classification,
        audit_step,
    }
}
