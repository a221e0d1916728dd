//! Calculation logic for the overwork tracker.
//!
//! This module contains the duration arithmetic, same-day grouping of work
//! sessions, the daily overwork allocation, monetary valuation of worked and
//! overwork time, and the assembly of those results into reports.

mod day_group;
mod duration;
mod overwork;
mod payroll;
mod report;

pub(crate) use day_group::sort_by_start;
pub use day_group::{DayGrouping, group_by_day, group_key, same_day_group};
pub use duration::{format_hours_minutes, hours_decimal, session_duration, total_duration};
pub use overwork::{
    DEFAULT_DAILY_THRESHOLD_HOURS, OverworkDetection, compute_overwork, default_daily_threshold,
    detect_overwork, threshold_crossing_instant,
};
pub use payroll::{
    DEFAULT_OVERWORK_PREMIUM, MONEY_DECIMAL_PLACES, PayValue, calculate_value, round_money,
};
pub use report::{
    SessionEvaluation, build_issue_report, calculate_batch, evaluate_session, summarize,
};
