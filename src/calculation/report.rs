//! Report assembly.
//!
//! Turns sessions into [`SessionLine`]s, totals and audit traces. Every
//! session is evaluated against a fresh snapshot of its day group read
//! through a [`SessionSource`].

use std::collections::HashSet;
use std::time::Instant;

use chrono::{TimeDelta, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, Issue, IssueReport, ReportTotals,
    SessionLine, WorkSession,
};
use crate::store::SessionSource;

use super::day_group::{DayGrouping, group_key, sort_by_start};
use super::duration::{format_hours_minutes, hours_decimal, total_duration};
use super::overwork::detect_overwork;
use super::payroll::{PayValue, calculate_value};

/// A session's report line together with its value and audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvaluation {
    /// The line as it appears in a report.
    pub line: SessionLine,
    /// Worked duration.
    pub worked: TimeDelta,
    /// Overwork duration.
    pub overwork: TimeDelta,
    /// Value with both components rounded to cents.
    pub value: PayValue,
    /// The overwork allocation decision.
    pub audit_step: AuditStep,
}

/// Evaluates one session: overwork allocation, rate lookup and valuation.
///
/// # Errors
///
/// Propagates lookup errors from `source` and
/// [`TrackerError::RateNotFound`] if no rate covers the session's day.
pub fn evaluate_session<S>(
    session: &WorkSession,
    source: &S,
    config: &TrackerConfig,
    step_number: u32,
) -> TrackerResult<SessionEvaluation>
where
    S: SessionSource + ?Sized,
{
    let same_day = source.same_day_sessions(session, config.day_grouping())?;
    let detection = detect_overwork(session, &same_day, config.threshold(), step_number);

    let date = group_key(session);
    let hourly_rate = config.hourly_rate(date)?;
    let value = calculate_value(
        detection.worked,
        detection.overwork,
        hourly_rate,
        config.overwork_premium(),
    )
    .rounded();

    debug!(
        session_id = %session.id,
        %date,
        day_sessions = same_day.len(),
        overwork_minutes = detection.overwork.num_minutes(),
        classification = ?detection.classification,
        "Session evaluated"
    );

    let line = SessionLine {
        session_id: session.id.clone(),
        issue_id: session.issue_id.clone(),
        date,
        start: session.start,
        end: session.end,
        overwork_day: session.overwork_day,
        description: session.description.clone(),
        worked: format_hours_minutes(detection.worked),
        worked_hours: hours_decimal(detection.worked),
        overwork: format_hours_minutes(detection.overwork),
        overwork_hours: hours_decimal(detection.overwork),
        classification: detection.classification,
        hourly_rate,
        amount: value.total(),
    };

    Ok(SessionEvaluation {
        line,
        worked: detection.worked,
        overwork: detection.overwork,
        value,
        audit_step: detection.audit_step,
    })
}

/// Aggregates evaluations into report totals.
///
/// Amounts are exact sums of the per-session rounded components, so
/// `total_amount` always equals the sum of the line amounts.
pub fn summarize(evaluations: &[SessionEvaluation], currency: &str) -> ReportTotals {
    let worked = total_duration(evaluations.iter().map(|e| e.worked));
    let overwork = total_duration(evaluations.iter().map(|e| e.overwork));
    let value: PayValue = evaluations.iter().map(|e| e.value).sum();

    ReportTotals {
        worked: format_hours_minutes(worked),
        worked_hours: hours_decimal(worked),
        overwork: format_hours_minutes(overwork),
        overwork_hours: hours_decimal(overwork),
        regular_amount: value.regular_amount,
        premium_amount: value.premium_amount,
        total_amount: value.total(),
        currency: currency.to_string(),
    }
}

/// Builds the report for one issue from every session booked against it.
///
/// An issue without sessions yields an empty report with zero totals.
///
/// # Errors
///
/// Propagates lookup errors from `source` (including an unknown issue)
/// and rate lookup failures.
pub fn build_issue_report<S>(
    issue: &Issue,
    source: &S,
    config: &TrackerConfig,
) -> TrackerResult<IssueReport>
where
    S: SessionSource + ?Sized,
{
    let sessions = source.sessions_for_issue(&issue.id)?;
    let evaluations = sessions
        .iter()
        .enumerate()
        .map(|(i, s)| evaluate_session(s, source, config, i as u32 + 1))
        .collect::<TrackerResult<Vec<_>>>()?;

    let totals = summarize(&evaluations, config.currency());
    info!(
        issue_id = %issue.id,
        sessions = evaluations.len(),
        worked = %totals.worked,
        overwork = %totals.overwork,
        total_amount = %totals.total_amount,
        "Issue report built"
    );

    Ok(IssueReport {
        issue: issue.clone(),
        lines: evaluations.into_iter().map(|e| e.line).collect(),
        totals,
    })
}

/// Calculates overwork and value for a self-contained batch of sessions.
///
/// The batch is its own record store: each session's day group is drawn
/// from the batch only. Sessions are validated first; ids must be unique.
///
/// # Errors
///
/// - [`TrackerError::InvalidSession`] for a session failing validation
/// - [`TrackerError::DuplicateId`] if two sessions share an id
/// - [`TrackerError::RateNotFound`] if no rate covers a session's day
pub fn calculate_batch(
    sessions: &[WorkSession],
    config: &TrackerConfig,
) -> TrackerResult<CalculationResult> {
    let started = Instant::now();

    let mut seen = HashSet::new();
    for session in sessions {
        session.validate()?;
        if !seen.insert(session.id.as_str()) {
            return Err(TrackerError::DuplicateId {
                kind: "session",
                id: session.id.clone(),
            });
        }
    }

    let mut ordered = sessions.to_vec();
    sort_by_start(&mut ordered);

    let mut warnings = Vec::new();
    if config.day_grouping() == DayGrouping::ExactDate {
        for session in ordered.iter().filter(|s| s.crosses_midnight()) {
            warnings.push(AuditWarning {
                code: "CROSS_MIDNIGHT_SESSION".to_string(),
                message: format!(
                    "Session '{}' crosses midnight and was evaluated as its own day",
                    session.id
                ),
                severity: "medium".to_string(),
            });
        }
    }

    let evaluations = ordered
        .iter()
        .enumerate()
        .map(|(i, s)| evaluate_session(s, sessions, config, i as u32 + 1))
        .collect::<TrackerResult<Vec<_>>>()?;

    let totals = summarize(&evaluations, config.currency());
    let mut steps: Vec<AuditStep> = evaluations.iter().map(|e| e.audit_step.clone()).collect();
    steps.push(AuditStep {
        step_number: steps.len() as u32 + 1,
        rule_id: "overwork_valuation".to_string(),
        rule_name: "Overwork Valuation".to_string(),
        input: serde_json::json!({
            "worked": totals.worked,
            "overwork": totals.overwork,
            "overwork_premium": config.overwork_premium().normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_amount": totals.regular_amount.to_string(),
            "premium_amount": totals.premium_amount.to_string(),
            "total_amount": totals.total_amount.to_string()
        }),
        reasoning: format!(
            "{} worked at the base rate plus a {} premium on {} of overwork",
            totals.worked,
            config.overwork_premium().normalize(),
            totals.overwork
        ),
    });

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        lines: evaluations.into_iter().map(|e| e.line).collect(),
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: started.elapsed().as_micros() as u64,
        },
    })
}
