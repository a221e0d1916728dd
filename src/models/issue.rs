//! Issue model.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{TrackerError, TrackerResult};

/// A tracked issue that work sessions are booked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier for the issue.
    pub id: String,
    /// Link to the ticket in the external issue tracker. Must be an absolute URL.
    pub url: String,
}

impl Issue {
    /// Checks the invariants an issue must satisfy before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidIssue`] naming the offending field.
    pub fn validate(&self) -> TrackerResult<()> {
        if self.id.trim().is_empty() {
            return Err(TrackerError::InvalidIssue {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.url.trim().is_empty() {
            return Err(TrackerError::InvalidIssue {
                field: "url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Url::parse(&self.url).map_err(|err| TrackerError::InvalidIssue {
            field: "url".to_string(),
            message: format!("'{}' is not a valid URL: {}", self.url, err),
        })?;
        Ok(())
    }
}
