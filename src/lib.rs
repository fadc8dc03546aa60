//! # Timesheet
//!
//! A command-line helper that keeps a Jira timesheet: for each requested day
//! it makes sure a tracking issue exists and records the worked hours against
//! it in Tempo, or reports what has been logged so far.
//!
//! ## Features
//!
//! - **Date Expressions**: `week`, `week-1`, `today+1`, `2024/03/05`
//! - **Jira Integration**: creates and finds one issue per day
//! - **Tempo Integration**: submits and sums worklogs per issue
//! - **Configuration**: config file, flags and environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timesheet::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
