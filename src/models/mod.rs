//! Core data models for the overwork tracker.
//!
//! This module contains the records the tracker stores and the report
//! structures it produces.

mod calculation_result;
mod issue;
mod work_session;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, IssueReport, OverworkClass,
    ReportTotals, SessionLine,
};
pub use issue::Issue;
pub use work_session::{MAX_DESCRIPTION_LEN, WorkSession};
