//! Tempo REST API client (core API v3, <https://apidocs.tempo.io/>).
//!
//! Records worked time against a Jira issue key and reads it back. Every
//! request carries the bearer token and a JSON content type; a non-2xx
//! response is reported with the full response dump.

use super::ensure_success;
use crate::libs::error::{Result, TimesheetError};
use crate::libs::messages::Message;
use crate::msg_debug;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.tempo.io/core/3";
const WORKLOGS_URL: &str = "worklogs";
const START_DATE_FORMAT: &str = "%Y-%m-%d";
const START_TIME: &str = "00:00:00";
const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Body of `POST /worklogs`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorklog {
    pub issue_key: String,
    pub time_spent_seconds: u64,
    pub billable_seconds: u64,
    pub start_date: String,
    pub start_time: String,
    pub description: String,
    pub author_account_id: String,
    pub remaining_estimate_seconds: u64,
}

impl NewWorklog {
    /// A full day entry: starts at midnight, every second billable.
    pub fn day(date: NaiveDate, hours: u32, issue_key: &str, author_account_id: &str) -> Self {
        let seconds = u64::from(hours) * SECONDS_PER_HOUR;
        Self {
            issue_key: issue_key.to_string(),
            time_spent_seconds: seconds,
            billable_seconds: seconds,
            start_date: date.format(START_DATE_FORMAT).to_string(),
            start_time: START_TIME.to_string(),
            description: format!("Working on issue {}.", issue_key),
            author_account_id: author_account_id.to_string(),
            remaining_estimate_seconds: 0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorklogIssue {
    pub key: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorklogAuthor {
    pub account_id: String,
}

/// A worklog as listed by `GET /worklogs`. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Worklog {
    pub tempo_worklog_id: u64,
    pub issue: WorklogIssue,
    pub time_spent_seconds: u64,
    pub billable_seconds: u64,
    pub start_date: String,
    pub start_time: String,
    pub description: String,
    pub author: WorklogAuthor,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct WorklogsResponse {
    results: Vec<Worklog>,
}

/// Whole hours of billable time across `worklogs`.
///
/// Fractions are truncated: 5400 seconds is 1 hour, not 2.
pub fn billable_hours(worklogs: &[Worklog]) -> u64 {
    let seconds: u64 = worklogs.iter().map(|worklog| worklog.billable_seconds).sum();
    seconds / SECONDS_PER_HOUR
}

#[derive(Debug)]
pub struct Tempo {
    client: Client,
    config: TempoConfig,
    account_id: String,
}

impl Tempo {
    /// Creates a client logging time on behalf of the Jira `account_id`.
    pub fn new(config: &TempoConfig, account_id: &str) -> Result<Self> {
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| TimesheetError::config(format!("invalid Tempo token: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| TimesheetError::config(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            account_id: account_id.to_string(),
        })
    }

    /// Logs `hours` on `date` against `issue_key`.
    ///
    /// # Errors
    ///
    /// [`TimesheetError::Submit`] with the response dump on a non-2xx status,
    /// [`TimesheetError::Http`] on network failure.
    pub async fn log_day(&self, date: NaiveDate, hours: u32, issue_key: &str) -> Result<()> {
        let worklog = NewWorklog::day(date, hours, issue_key, &self.account_id);
        let url = self.config.endpoint(WORKLOGS_URL);
        msg_debug!(format!("POST {} {}s on {}", url, worklog.time_spent_seconds, issue_key));

        let res = self.client.post(&url).json(&worklog).send().await?;
        ensure_success(res, |dump| TimesheetError::Submit { dump }).await?;
        Ok(())
    }

    /// All worklogs recorded against `issue_key`.
    ///
    /// Only the first page of results is read.
    pub async fn worklogs(&self, issue_key: &str) -> Result<Vec<Worklog>> {
        let url = self.config.endpoint(WORKLOGS_URL);
        msg_debug!(format!("GET {}?issue={}", url, issue_key));

        let res = self.client.get(&url).query(&[("issue", issue_key)]).send().await?;
        let res = ensure_success(res, |dump| TimesheetError::Transport {
            context: format!("tempo worklogs of {}", issue_key),
            dump,
        })
        .await?;
        Ok(res.json::<WorklogsResponse>().await?.results)
    }

    /// Whole hours logged against `issue_key` (see [`billable_hours`]).
    pub async fn get_logged_hours(&self, issue_key: &str) -> Result<u64> {
        Ok(billable_hours(&self.worklogs(issue_key).await?))
    }
}

/// Tempo connection settings. The token is never written to the config file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TempoConfig {
    pub api_url: String,
    #[serde(skip)]
    pub token: String,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: String::new(),
        }
    }
}

impl TempoConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Prompts for the Tempo settings, prefilled from `config`.
    pub fn init(config: &Option<Self>) -> anyhow::Result<Self> {
        let config = config.clone().unwrap_or_default();
        println!("{}", Message::ConfigModuleTempo);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTempoUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            token: String::new(),
        })
    }
}
