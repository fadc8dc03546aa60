use crate::libs::{
    config::{Config, Overrides, Settings},
    dates::DateSpec,
    timesheet::Timesheet,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SeeArgs {
    #[arg(help = "Days to check: week[+N|-N], today[+N|-N], YYYY/MM/DD or YYYY-MM-DD")]
    pub date: String,
}

pub async fn cmd(args: SeeArgs, overrides: Overrides) -> Result<()> {
    let dates = DateSpec::parse(&args.date)?;
    let settings = Settings::resolve(Config::read()?, overrides)?;

    let timesheet = Timesheet::connect(&settings).await?;
    timesheet.see_days(dates.dates()).await;
    Ok(())
}
