//! Error taxonomy for the timesheet application.
//!
//! Errors fall into two groups:
//!
//! - **Fatal, pre-flight**: [`TimesheetError::Config`], [`TimesheetError::Auth`],
//!   [`TimesheetError::InvalidDateFormat`] and [`TimesheetError::InvalidHoursFormat`].
//!   These surface before any date is processed and end the process with a
//!   non-zero status.
//! - **Per-date**: everything else. The orchestrator reports them with the
//!   date they belong to and moves on to the next date.
//!
//! Variants raised from a non-2xx response carry the full response dump
//! (status line, headers and body) so the failure can be diagnosed from
//! the terminal output alone.

use thiserror::Error;

/// Result type alias used by the API clients and the orchestrator.
pub type Result<T> = std::result::Result<T, TimesheetError>;

#[derive(Error, Debug)]
pub enum TimesheetError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("error while fetching Jira user (hint: are the username (email) and token provided correct?): {0}")]
    Auth(String),

    #[error("unrecognized argument for date: {0}")]
    InvalidDateFormat(String),

    #[error("unrecognized argument for hours: {0}")]
    InvalidHoursFormat(String),

    #[error("{context}: unsuccessful response\n{dump}")]
    Transport { context: String, dump: String },

    #[error("jira error while creating issue:\n{dump}")]
    Create { dump: String },

    #[error("tempo error while submitting worklog:\n{dump}")]
    Submit { dump: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("found no issue matching assignee='{assignee}' and summary='{summary}' and project='{project}'")]
    NotFound {
        assignee: String,
        summary: String,
        project: String,
    },

    #[error("found more than one issue (expected 1) matching assignee='{assignee}' and date='{date}': {}", keys.join(","))]
    Ambiguous {
        assignee: String,
        date: String,
        keys: Vec<String>,
    },
}

impl TimesheetError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        TimesheetError::Config(msg.into())
    }
}
