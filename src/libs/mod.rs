//! Core library modules for the timesheet application.
//!
//! - **Configuration**: config file, flag/env overrides, data directory
//! - **Dates**: date expressions such as `week-1` or `2024/03/05`
//! - **Errors**: the error taxonomy shared by clients and commands
//! - **Messages**: user-facing text and output macros
//! - **Timesheet**: the per-date orchestration of Jira and Tempo
//!
//! ```rust,no_run
//! use timesheet::libs::dates::DateSpec;
//!
//! let spec = DateSpec::parse("week-1")?;
//! assert_eq!(spec.len(), 5);
//! # Ok::<(), timesheet::libs::error::TimesheetError>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod dates;
pub mod error;
pub mod messages;
pub mod timesheet;
