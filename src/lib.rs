//! Timesheet tracker that allocates daily overwork across work sessions.
//!
//! This crate records work sessions against issues and computes, for each
//! session, its worked duration, the part of it that is overwork (time past
//! a daily threshold of 9 hours, or all of it on a flagged overwork day),
//! and the resulting monetary value for payroll reporting.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
