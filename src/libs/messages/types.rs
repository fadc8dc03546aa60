/// Every user-facing message printed by the application.
///
/// Text lives in the `Display` implementation (see `display.rs`), so the
/// wording of each message is defined in exactly one place.
#[derive(Debug, Clone)]
pub enum Message {
    // === TIMESHEET MESSAGES ===
    IssueDetail {
        link: String,
        hours: u64,
        summary: String,
    },
    LogFailed {
        hours: u32,
        weekday: String,
        date: String,
        error: String,
    },
    SeeFailed {
        weekday: String,
        date: String,
        error: String,
    },
    LogDone,
    JiraUserAuthenticated(String), // display name or account id

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigFileNotFound,
    ConfigModuleJira,
    ConfigModuleTempo,

    // === PROMPTS ===
    PromptJiraUrl,
    PromptJiraProjectKey,
    PromptJiraLogin,
    PromptTempoUrl,
}
