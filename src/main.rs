use timesheet::commands::Cli;
use timesheet::libs::messages::macros::is_debug_mode;
use timesheet::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Environment from .env must be in place before flags are parsed.
    let _ = dotenv::dotenv();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
            .init();
    }

    if let Err(e) = Cli::menu().await {
        msg_error!(e);
        std::process::exit(1);
    }
}
