//! Application configuration initialization command.
//!
//! Runs an interactive wizard for the Jira and Tempo settings and stores
//! them in the configuration file. Tokens are not asked for: they are
//! passed with `--jira-token` / `--tempo-token` or `JIRA_TOKEN` / `TEMPO_TOKEN`.

use crate::{
    libs::{config::Config, data_storage::DataStorage, messages::Message},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration file instead of creating a new one
    #[arg(short, long)]
    pub delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        if !Config::delete_from(&DataStorage::new())? {
            msg_bail_anyhow!(Message::ConfigFileNotFound);
        }
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
