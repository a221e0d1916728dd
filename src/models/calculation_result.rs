//! Report models for the overwork tracker.
//!
//! This module contains the [`CalculationResult`] and [`IssueReport`] types and
//! their associated structures that capture everything a report consumer
//! needs: per-session lines, aggregated totals, and the audit trace.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Issue;

/// How a session relates to its day's overwork threshold.
///
/// # Example
///
/// ```
/// use overwork_tracker::models::OverworkClass;
///
/// let class = OverworkClass::Straddles;
/// assert_eq!(serde_json::to_string(&class).unwrap(), "\"straddles\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverworkClass {
    /// The session is flagged as an overwork day; all of it is overwork.
    FlaggedDay,
    /// The day's total does not exceed the threshold.
    UnderThreshold,
    /// The session ends at or before the threshold-crossing instant.
    BeforeThreshold,
    /// The threshold-crossing instant falls strictly inside the session.
    Straddles,
    /// The session starts at or after the threshold-crossing instant.
    AfterThreshold,
    /// The day exceeds the threshold but no crossing instant could be found.
    NoCrossing,
}

/// A single session's line in a report.
///
/// Durations are given twice: as an `HH:MM` string for display and as
/// decimal hours for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLine {
    /// The session this line describes.
    pub session_id: String,
    /// The issue the session is booked against.
    pub issue_id: String,
    /// The calendar day the session was grouped under.
    pub date: NaiveDate,
    /// Session start.
    pub start: DateTime<FixedOffset>,
    /// Session end.
    pub end: DateTime<FixedOffset>,
    /// Whether the session carries the overwork-day flag.
    pub overwork_day: bool,
    /// The session's description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Worked duration as `HH:MM`.
    pub worked: String,
    /// Worked duration in hours.
    pub worked_hours: Decimal,
    /// Overwork duration as `HH:MM`.
    pub overwork: String,
    /// Overwork duration in hours.
    pub overwork_hours: Decimal,
    /// How the session relates to the day's threshold.
    pub classification: OverworkClass,
    /// Hourly rate effective on `date`.
    pub hourly_rate: Decimal,
    /// Value of the session, rounded to cents.
    pub amount: Decimal,
}

/// Aggregated totals over a set of report lines.
///
/// # Example
///
/// ```
/// use overwork_tracker::models::ReportTotals;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = ReportTotals {
///     worked: "10:00".to_string(),
///     worked_hours: Decimal::from_str("10").unwrap(),
///     overwork: "01:00".to_string(),
///     overwork_hours: Decimal::from_str("1").unwrap(),
///     regular_amount: Decimal::from_str("300.00").unwrap(),
///     premium_amount: Decimal::from_str("12.00").unwrap(),
///     total_amount: Decimal::from_str("312.00").unwrap(),
///     currency: "EUR".to_string(),
/// };
/// assert_eq!(totals.regular_amount + totals.premium_amount, totals.total_amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Total worked duration as `HH:MM`.
    pub worked: String,
    /// Total worked duration in hours.
    pub worked_hours: Decimal,
    /// Total overwork duration as `HH:MM`.
    pub overwork: String,
    /// Total overwork duration in hours.
    pub overwork_hours: Decimal,
    /// Value of all worked hours at the base rate.
    pub regular_amount: Decimal,
    /// Premium paid on top for overwork hours.
    pub premium_amount: Decimal,
    /// `regular_amount + premium_amount`.
    pub total_amount: Decimal,
    /// ISO 4217 currency code for the amounts.
    pub currency: String,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate inputs that were handled but may need a human look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Report for a single issue: all of its sessions and their totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueReport {
    /// The issue being reported on.
    pub issue: Issue,
    /// One line per session booked against the issue, ordered by start.
    pub lines: Vec<SessionLine>,
    /// Totals over `lines`.
    pub totals: ReportTotals,
}

/// The complete result of a stateless calculation over a batch of sessions.
///
/// # Example
///
/// ```
/// use overwork_tracker::models::{AuditTrace, CalculationResult, ReportTotals};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let result = CalculationResult {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     lines: vec![],
///     totals: ReportTotals {
///         worked: "00:00".to_string(),
///         worked_hours: Decimal::ZERO,
///         overwork: "00:00".to_string(),
///         overwork_hours: Decimal::ZERO,
///         regular_amount: Decimal::ZERO,
///         premium_amount: Decimal::ZERO,
///         total_amount: Decimal::ZERO,
///         currency: "EUR".to_string(),
///     },
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert!(result.lines.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the tracker that performed the calculation.
    pub engine_version: String,
    /// One line per submitted session, ordered by start.
    pub lines: Vec<SessionLine>,
    /// Aggregated totals for the batch.
    pub totals: ReportTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
