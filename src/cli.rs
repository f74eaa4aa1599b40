use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Forecast periods and ovulation from a logged period history.
///
/// History is read as a JSON array of `{start, end}` (or `{start_date, end_date}`)
/// records with `YYYY-MM-DD` dates.
#[derive(Debug, Parser)]
#[command(name = "luna-cycle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// History file to read (defaults to stdin)
    #[arg(short, long, global = true, env = "LUNA_INPUT")]
    pub input: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the next period(s) and the ovulation window
    Predict(HorizonArgs),

    /// Cycle statistics and how they compare to typical ranges
    Stats,

    /// Describe a single calendar day
    Day(DayArgs),

    /// Log or un-log a period on a day, printing the edited history
    Toggle(ToggleArgs),
}

#[derive(Debug, Args)]
pub struct HorizonArgs {
    /// Number of future periods to forecast
    #[arg(long, default_value_t = 1, env = "LUNA_HORIZON", value_parser = clap::value_parser!(u16).range(1..))]
    pub horizon: u16,
}

#[derive(Debug, Args)]
pub struct DayArgs {
    /// Day to describe (YYYY-MM-DD)
    pub date: NaiveDate,

    #[command(flatten)]
    pub forecast: HorizonArgs,
}

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Day to toggle (YYYY-MM-DD)
    pub date: NaiveDate,
}
