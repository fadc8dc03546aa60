pub mod init;
pub mod log;
pub mod see;

use crate::libs::config::Overrides;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Create a Jira ticket per day and assign it worked hours in Tempo", arg_required_else_help = true)]
    Log(log::LogArgs),
    #[command(about = "Check the Jira ticket of each day and the hours logged in Tempo", arg_required_else_help = true)]
    See(see::SeeArgs),
}

/// Connection settings accepted on the command line or from the environment.
///
/// Any value given here wins over the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    #[arg(long, global = true, env = "JIRA_URL", help = "Base url for your company Jira (e.g. https://my-company.atlassian.net/)")]
    jira_url: Option<String>,
    #[arg(long, global = true, env = "JIRA_PROJECT_KEY", help = "Key of the Jira project used to track timesheet tasks")]
    jira_project_key: Option<String>,
    #[arg(long, global = true, env = "JIRA_USERNAME", help = "Jira username (email)")]
    jira_user: Option<String>,
    #[arg(long, global = true, env = "JIRA_TOKEN", hide_env_values = true, help = "Jira REST API token")]
    jira_token: Option<String>,
    #[arg(long, global = true, env = "TEMPO_TOKEN", hide_env_values = true, help = "Tempo REST API token")]
    tempo_token: Option<String>,
    #[arg(long, global = true, env = "TEMPO_URL", help = "Tempo REST API url")]
    tempo_url: Option<String>,
}

impl From<ConnectionArgs> for Overrides {
    fn from(args: ConnectionArgs) -> Self {
        Overrides {
            jira_url: args.jira_url,
            jira_project_key: args.jira_project_key,
            jira_user: args.jira_user,
            jira_token: args.jira_token,
            tempo_token: args.tempo_token,
            tempo_url: args.tempo_url,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        Self::parse().run().await
    }

    /// Dispatches an already parsed command line.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Log(args) => log::cmd(args, self.connection.into()).await,
            Commands::See(args) => see::cmd(args, self.connection.into()).await,
        }
    }
}
