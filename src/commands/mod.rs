use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

// Export submodules
pub mod calendar;

/// Command line interface for the borough event calendar
#[derive(Debug, Parser)]
#[command(name = "borocal", version, about = "Glen Rock NJ borough event calendar")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List today's matching events
    Today(QueryArgs),
    /// List tomorrow's matching events
    Tomorrow(QueryArgs),
    /// List the year's matching events grouped by date
    Year(QueryArgs),
    /// Dump the raw JSON payload for a date range
    Range(RangeArgs),
}

/// Options shared by all calendar queries
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Menu item id of the calendar feed
    #[arg(long)]
    pub item_id: Option<u32>,

    /// Maximum number of events to request (0 = unbounded)
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Options for the raw range dump
#[derive(Debug, Args)]
pub struct RangeArgs {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,

    #[command(flatten)]
    pub query: QueryArgs,
}
