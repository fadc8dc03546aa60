//! Timesheet orchestration: one Jira issue and one Tempo worklog per day.
//!
//! For every requested date the orchestrator runs independently:
//!
//! ```text
//! log:  Start ──create_issue──▶ TicketResolved ──log_day──▶ WorklogSubmitted ──▶ Done
//!         │                           │
//!         └───────────────────────────┴──────▶ Failed (reported, next date)
//!
//! see:  Start ──find_issue──▶ TicketResolved ──get_logged_hours──▶ Done
//! ```
//!
//! Dates are processed one after the other in the given order. A failing
//! date is reported with its weekday and the error, and processing
//! continues with the next date. Nothing is retried and an issue created
//! before a failed worklog submission is left in place.

use crate::api::jira::{Jira, JiraIssue};
use crate::api::tempo::Tempo;
use crate::libs::config::Settings;
use crate::libs::error::Result;
use crate::libs::messages::Message;
use crate::{msg_print, msg_success, msg_warning};
use chrono::NaiveDate;

/// What a successful `log` or `see` did for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub issue_key: String,
    pub link: String,
    pub summary: String,
    pub hours: u64,
}

impl DayReport {
    fn new(date: NaiveDate, issue: &JiraIssue, hours: u64) -> Self {
        Self {
            date,
            issue_key: issue.key.clone(),
            link: issue.link_to_ui(),
            summary: issue.summary().to_string(),
            hours,
        }
    }

    fn print(&self) {
        msg_print!(Message::IssueDetail {
            link: self.link.clone(),
            hours: self.hours,
            summary: self.summary.clone(),
        });
    }
}

#[derive(Debug)]
pub struct Timesheet {
    jira: Jira,
    tempo: Tempo,
}

impl Timesheet {
    pub fn new(jira: Jira, tempo: Tempo) -> Self {
        Self { jira, tempo }
    }

    /// Authenticates against Jira and prepares the Tempo client for the
    /// same account.
    ///
    /// # Errors
    ///
    /// Authentication and configuration errors; both are fatal for the run.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let jira = Jira::authenticate(&settings.jira).await?;
        let tempo = Tempo::new(&settings.tempo, &jira.me().account_id)?;
        Ok(Self::new(jira, tempo))
    }

    /// Creates the issue for `date` and logs `hours` against it.
    ///
    /// The issue line is printed as soon as the issue exists, before the
    /// worklog is submitted.
    pub async fn log(&self, date: NaiveDate, hours: u32) -> Result<DayReport> {
        let issue = self.jira.create_issue(date).await?;
        let report = DayReport::new(date, &issue, u64::from(hours));
        report.print();
        self.tempo.log_day(date, hours, &issue.key).await?;
        Ok(report)
    }

    /// Finds the issue for `date` and reports the hours logged against it.
    pub async fn see(&self, date: NaiveDate) -> Result<DayReport> {
        let issue = self.jira.find_issue(self.jira.search_assignee(), date).await?;
        let hours = self.tempo.get_logged_hours(&issue.key).await?;
        let report = DayReport::new(date, &issue, hours);
        report.print();
        Ok(report)
    }

    /// Runs [`Timesheet::log`] for every date, reporting failures and moving on.
    ///
    /// Returns the reports of the dates that succeeded.
    pub async fn log_days(&self, dates: &[NaiveDate], hours: u32) -> Vec<DayReport> {
        let mut reports = Vec::with_capacity(dates.len());
        for &date in dates {
            match self.log(date, hours).await {
                Ok(report) => reports.push(report),
                Err(e) => msg_warning!(Message::LogFailed {
                    hours,
                    weekday: date.format("%A").to_string(),
                    date: date.to_string(),
                    error: e.to_string(),
                }),
            }
        }
        msg_success!(Message::LogDone);
        reports
    }

    /// Runs [`Timesheet::see`] for every date, reporting failures and moving on.
    pub async fn see_days(&self, dates: &[NaiveDate]) -> Vec<DayReport> {
        let mut reports = Vec::with_capacity(dates.len());
        for &date in dates {
            match self.see(date).await {
                Ok(report) => reports.push(report),
                Err(e) => msg_warning!(Message::SeeFailed {
                    weekday: date.format("%A").to_string(),
                    date: date.to_string(),
                    error: e.to_string(),
                }),
            }
        }
        reports
    }
}
