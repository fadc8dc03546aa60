use crate::libs::{
    config::{Config, Overrides, Settings},
    dates::{parse_hours, DateSpec},
    timesheet::Timesheet,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    #[arg(help = "Days to log: week[+N|-N], today[+N|-N], YYYY/MM/DD or YYYY-MM-DD")]
    pub date: String,
    #[arg(help = "Worked hours per day [default: 8]")]
    pub hours: Option<String>,
}

/// Parses the arguments, connects, then logs every selected day.
///
/// Argument, configuration and authentication errors abort before any day
/// is touched; a failing day is reported and does not change the outcome.
pub async fn cmd(args: LogArgs, overrides: Overrides) -> Result<()> {
    let dates = DateSpec::parse(&args.date)?;
    let hours = parse_hours(args.hours.as_deref())?;
    let settings = Settings::resolve(Config::read()?, overrides)?;

    let timesheet = Timesheet::connect(&settings).await?;
    timesheet.log_days(dates.dates(), hours).await;
    Ok(())
}
