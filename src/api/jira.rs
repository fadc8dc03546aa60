//! Jira REST API client.
//!
//! Maps a calendar date to exactly one Jira issue, either by creating it or by
//! finding the one created earlier. Issues are named after the date (see
//! [`issue_summary`]), assigned to the authenticated user and filed in the
//! configured project.
//!
//! Authentication uses HTTP basic auth with the Jira username (email) and an
//! API token. [`Jira::authenticate`] fetches the caller's identity first;
//! every later call relies on it, so a failure there is fatal for the run.

use super::ensure_success;
use crate::libs::error::{Result, TimesheetError};
use crate::libs::messages::Message;
use crate::msg_debug;
use base64::prelude::*;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};
use url::Url;

const MYSELF_URL: &str = "rest/api/2/myself";
const ISSUE_URL: &str = "rest/api/2/issue";
const SEARCH_URL: &str = "rest/api/2/search";
const ISSUE_TYPE: &str = "Task";
const SUMMARY_DATE_FORMAT: &str = "%Y/%m/%d";

/// Jira user as returned by `GET /rest/api/2/myself`.
///
/// Only the account id is required. Jira Cloud hides the email address
/// for some privacy settings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct JiraUser {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JiraProject {
    pub key: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JiraIssueType {
    pub name: String,
}

/// Issue fields, used both for the creation request and for search results.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct JiraIssueFields {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<JiraUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<JiraProject>,
    #[serde(rename = "issuetype", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<JiraIssueType>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JiraIssue {
    #[serde(default)]
    pub id: String,
    pub key: String,
    /// Machine resource URL of the issue (`.../rest/api/2/issue/10001`)
    #[serde(rename = "self", default)]
    pub self_url: String,
    #[serde(default)]
    pub fields: JiraIssueFields,
}

impl JiraIssue {
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Link to the issue intended for humans.
    ///
    /// Built as `{scheme}://{host}/browse/{key}` from the resource URL; the
    /// resource URL itself is returned when it has no usable host.
    pub fn link_to_ui(&self) -> String {
        let Ok(url) = Url::parse(&self.self_url) else {
            return self.self_url.clone();
        };
        match url.host_str() {
            Some(host) => {
                let port = url.port().map(|port| format!(":{}", port)).unwrap_or_default();
                format!("{}://{}{}/browse/{}", url.scheme(), host, port, self.key)
            }
            None => self.self_url.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
struct NewIssue<'a> {
    fields: &'a JiraIssueFields,
}

#[derive(Deserialize, Debug)]
struct JiraSearchResults {
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

/// Summary convention for timesheet issues, e.g. `2024/03/05 Tuesday`.
///
/// Used when creating an issue and when searching for it again.
pub fn issue_summary(date: NaiveDate) -> String {
    format!("{} {}", date.format(SUMMARY_DATE_FORMAT), date.format("%A"))
}

/// Both spellings an issue for `date` may carry: the convention itself and
/// its hyphenated form, since Jira may normalize `/` in summaries.
pub fn search_summaries(date: NaiveDate) -> [String; 2] {
    let summary = issue_summary(date);
    let hyphenated = summary.replace('/', "-");
    [summary, hyphenated]
}

/// JQL selecting the timesheet issue of `assignee` for `date` in `project_key`.
///
/// Query language reference:
/// <https://support.atlassian.com/jira-software-cloud/docs/advanced-search-reference-jql-fields/>
pub fn search_jql(assignee: &str, project_key: &str, date: NaiveDate) -> String {
    let [summary, hyphenated] = search_summaries(date);
    format!(
        r#"assignee = "{}" AND (summary ~ "{}" OR summary ~ "{}") AND project = "{}""#,
        assignee, summary, hyphenated, project_key
    )
}

#[derive(Debug)]
pub struct Jira {
    client: Client,
    config: JiraConfig,
    me: JiraUser,
}

impl Jira {
    /// Connects to Jira and fetches the identity behind the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetError::Auth`] if the request fails or Jira rejects the
    /// credentials, and [`TimesheetError::Config`] if the credentials cannot be
    /// turned into a header. Callers treat both as fatal.
    pub async fn authenticate(config: &JiraConfig) -> Result<Self> {
        let client = Self::build_client(config)?;
        let url = config.endpoint(MYSELF_URL);
        msg_debug!(format!("GET {}", url));

        let res = client
            .get(&url)
            .send()
            .await
            .map_err(|e| TimesheetError::Auth(e.to_string()))?;
        let res = ensure_success(res, TimesheetError::Auth).await?;
        let me = res
            .json::<JiraUser>()
            .await
            .map_err(|e| TimesheetError::Auth(e.to_string()))?;

        if me.account_id.is_empty() {
            return Err(TimesheetError::Auth("Jira returned a user without an account id".to_string()));
        }

        let name = me.display_name.clone().unwrap_or_else(|| me.account_id.clone());
        msg_debug!(Message::JiraUserAuthenticated(name));

        Ok(Self {
            client,
            config: config.clone(),
            me,
        })
    }

    fn build_client(config: &JiraConfig) -> Result<Client> {
        let credentials = BASE64_STANDARD.encode(format!("{}:{}", config.login, config.token));
        let auth = HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|e| TimesheetError::config(format!("invalid Jira credentials: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| TimesheetError::config(e.to_string()))
    }

    /// The authenticated user.
    pub fn me(&self) -> &JiraUser {
        &self.me
    }

    pub fn project_key(&self) -> &str {
        &self.config.project_key
    }

    /// Identifier used as the assignee when searching: the email address when
    /// Jira exposes it, the account id otherwise.
    pub fn search_assignee(&self) -> &str {
        self.me.email_address.as_deref().unwrap_or(&self.me.account_id)
    }

    /// Creates the timesheet issue for `date`, assigned to the caller.
    ///
    /// Jira answers with the issue id, key and resource URL only, so the
    /// returned issue carries the fields that were sent.
    ///
    /// # Errors
    ///
    /// [`TimesheetError::Create`] with the response dump on a non-2xx status,
    /// [`TimesheetError::Http`] on network or decoding failure.
    pub async fn create_issue(&self, date: NaiveDate) -> Result<JiraIssue> {
        let fields = JiraIssueFields {
            summary: issue_summary(date),
            assignee: Some(JiraUser {
                account_id: self.me.account_id.clone(),
                ..JiraUser::default()
            }),
            project: Some(JiraProject {
                key: self.config.project_key.clone(),
            }),
            issue_type: Some(JiraIssueType {
                name: ISSUE_TYPE.to_string(),
            }),
        };

        let url = self.config.endpoint(ISSUE_URL);
        msg_debug!(format!("POST {} ({})", url, fields.summary));
        let res = self.client.post(&url).json(&NewIssue { fields: &fields }).send().await?;
        let res = ensure_success(res, |dump| TimesheetError::Create { dump }).await?;

        let mut issue = res.json::<JiraIssue>().await?;
        issue.fields = fields;
        Ok(issue)
    }

    /// Finds the single timesheet issue of `assignee` for `date`.
    ///
    /// # Errors
    ///
    /// - [`TimesheetError::NotFound`] when nothing matches
    /// - [`TimesheetError::Ambiguous`] listing every key when more than one matches
    /// - [`TimesheetError::Transport`] / [`TimesheetError::Http`] when the search itself fails
    pub async fn find_issue(&self, assignee: &str, date: NaiveDate) -> Result<JiraIssue> {
        let jql = search_jql(assignee, &self.config.project_key, date);
        let url = self.config.endpoint(SEARCH_URL);
        msg_debug!(format!("GET {} jql={}", url, jql));

        let res = self.client.get(&url).query(&[("jql", jql.as_str())]).send().await?;
        let res = ensure_success(res, |dump| TimesheetError::Transport {
            context: "jira issue search".to_string(),
            dump,
        })
        .await?;
        let results = res.json::<JiraSearchResults>().await?;

        select_single(results.issues, assignee, &self.config.project_key, date)
    }
}

/// Applies the cardinality rule to search results: exactly one issue or an error.
fn select_single(mut issues: Vec<JiraIssue>, assignee: &str, project_key: &str, date: NaiveDate) -> Result<JiraIssue> {
    match issues.len() {
        0 => Err(TimesheetError::NotFound {
            assignee: assignee.to_string(),
            summary: issue_summary(date),
            project: project_key.to_string(),
        }),
        1 => Ok(issues.remove(0)),
        _ => Err(TimesheetError::Ambiguous {
            assignee: assignee.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            keys: issues.into_iter().map(|issue| issue.key).collect(),
        }),
    }
}

/// Jira connection settings.
///
/// Stored in the configuration file without the token, which only ever
/// comes from a flag or the environment.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct JiraConfig {
    pub api_url: String,
    pub project_key: String,
    pub login: String,
    #[serde(skip)]
    pub token: String,
}

impl JiraConfig {
    /// Absolute URL of `path` under the configured base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Prompts for the Jira settings, prefilled from `config`.
    pub fn init(config: &Option<Self>) -> anyhow::Result<Self> {
        let config = config.clone().unwrap_or_default();
        println!("{}", Message::ConfigModuleJira);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            project_key: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraProjectKey.to_string())
                .default(config.project_key)
                .interact_text()?,
            login: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraLogin.to_string())
                .default(config.login)
                .interact_text()?,
            token: String::new(),
        })
    }
}

