//! Display implementation for timesheet application messages.
//!
//! Converts the structured [`Message`] values into the text printed on the
//! terminal. Keeping all wording here means the output format of the
//! per-day detail line, the failure lines and the prompts can be checked
//! and changed in one place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TIMESHEET MESSAGES ===
            Message::IssueDetail { link, hours, summary } => format!("{}  {}h  {}", link, hours, summary),
            Message::LogFailed {
                hours,
                weekday,
                date,
                error,
            } => format!("Failed attempt to log {} hours for {} {}: {}", hours, weekday, date, error),
            Message::SeeFailed { weekday, date, error } => {
                format!("Failed attempt to see logged hours for {} {}: {}", weekday, date, error)
            }
            Message::LogDone => "Done. Have a nice day!".to_string(),
            Message::JiraUserAuthenticated(user) => format!("Authenticated in Jira as {}", user),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigFileNotFound => "Configuration file not found".to_string(),
            Message::ConfigModuleJira => "Jira settings".to_string(),
            Message::ConfigModuleTempo => "Tempo settings".to_string(),

            // === PROMPTS ===
            Message::PromptJiraUrl => "Enter the Jira base URL (e.g. https://my-company.atlassian.net/)".to_string(),
            Message::PromptJiraProjectKey => "Enter the key of the Jira project used for timesheet tasks".to_string(),
            Message::PromptJiraLogin => "Enter your Jira username (email)".to_string(),
            Message::PromptTempoUrl => "Enter the Tempo API URL".to_string(),
        };
        write!(f, "{}", text)
    }
}
