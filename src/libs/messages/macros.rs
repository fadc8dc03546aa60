//! Macros for application messaging and logging.
//!
//! Every macro takes a value implementing `Display` (usually a
//! [`Message`](crate::libs::messages::Message)) and routes it depending on
//! the debug mode:
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────────┐    ┌─────────────────┐
//! │   Macro Call    │───▶│ TIMESHEET_DEBUG or   │───▶│ tracing::info!  │
//! │   msg_print!()  │    │ RUST_LOG set?        │    │ OR println!     │
//! └─────────────────┘    └──────────────────────┘    └─────────────────┘
//! ```
//!
//! - **`msg_print!`**: plain message on stdout
//! - **`msg_success!`**: ✅ prefix on stdout
//! - **`msg_warning!`**: ⚠️ prefix on stdout
//! - **`msg_error!`**: ❌ prefix on stderr
//! - **`msg_debug!`**: 🔍 prefix, debug mode only
//! - **`msg_bail_anyhow!`**: return early with an `anyhow::Error`
//!
//! ```rust
//! use timesheet::{msg_print, msg_success};
//! use timesheet::libs::messages::Message;
//!
//! msg_success!(Message::ConfigSaved);
//! msg_print!(Message::LogDone, true);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Checks if debug mode is enabled, caching the answer for the process lifetime.
///
/// Debug mode is on when either `TIMESHEET_DEBUG` or `RUST_LOG` is set.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TIMESHEET_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a general message.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Prints an error message with ❌ prefix.
///
/// Normal mode writes to stderr so scripts can separate errors from data.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

/// Prints a warning message with ⚠️ prefix.
///
/// Used for failures that do not stop the run, such as one date out of a
/// week failing to log. Normal mode writes to stdout.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️ {}\n", $msg);
        }
    };
}

/// Debug-only message with 🔍 prefix. Suppressed entirely in normal mode.
///
/// ```rust
/// use timesheet::msg_debug;
///
/// msg_debug!(format!("POST {}", "https://api.tempo.io/core/3/worklogs"));
/// ```
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Early return with an error created from a message.
///
/// No prefix is added here; `main` prints the error through [`msg_error!`].
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
