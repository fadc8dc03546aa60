//! REST clients for the external services used by the timesheet.
//!
//! - **Jira**: identity lookup, issue creation and issue search (HTTP basic auth)
//! - **Tempo**: worklog creation and worklog listing by issue (bearer token)
//!
//! Both clients share the same transport contract: JSON content type on
//! every request, no retries, no explicit timeout, and any non-2xx response
//! is turned into an error carrying the full response dump.
//!
//! ```rust,no_run
//! use timesheet::api::{Jira, JiraConfig};
//!
//! # async fn run(config: JiraConfig) -> timesheet::libs::error::Result<()> {
//! let jira = Jira::authenticate(&config).await?;
//! let issue = jira.create_issue(chrono::Local::now().date_naive()).await?;
//! println!("{}", issue.link_to_ui());
//! # Ok(())
//! # }
//! ```

use crate::msg_debug;
use reqwest::Response;

pub mod jira;
pub mod tempo;

pub use jira::{Jira, JiraConfig};
pub use tempo::{Tempo, TempoConfig};

/// Renders a response the way it came over the wire: status line, headers,
/// blank line, body.
///
/// Consumes the response since the body can only be read once.
pub async fn dump_response(res: Response) -> String {
    let mut dump = format!("{:?} {}\n", res.version(), res.status());
    for (name, value) in res.headers() {
        dump.push_str(&format!("{}: {}\n", name, value.to_str().unwrap_or("<binary>")));
    }
    dump.push('\n');
    dump.push_str(&res.text().await.unwrap_or_default());
    dump
}

/// Passes 2xx responses through; anything else becomes the dump handed to
/// `on_failure`.
pub(crate) async fn ensure_success<E>(res: Response, on_failure: impl FnOnce(String) -> E) -> Result<Response, E> {
    msg_debug!(format!("{} {}", res.status(), res.url()));
    if res.status().is_success() {
        return Ok(res);
    }
    Err(on_failure(dump_response(res).await))
}
