//! Command-line interface definitions.
//!
//! All arguments can be provided via command-line flags or environment
//! variables, so the generator can run unattended from a scheduled job.

use crate::schedule::{DEFAULT_HORIZON_DAYS, MAX_HORIZON_DAYS};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the sample guide generator.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./channels.json -> ./public/guide.xml, 7 days from today (UTC)
/// sample_epg
///
/// # Fixed start day for reproducible output
/// sample_epg -c channels.yaml -o out/guide.xml --days 3 --start-date 2024-01-01
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Channel list (JSON, or YAML for .yaml/.yml files)
    #[arg(short, long, env = "EPG_CHANNELS", default_value = "channels.json")]
    pub channels: PathBuf,

    /// Path of the XMLTV file to write
    #[arg(short, long, env = "EPG_OUTPUT", default_value = "public/guide.xml")]
    pub output: PathBuf,

    /// Number of days to generate (at most 366)
    #[arg(
        short,
        long,
        env = "EPG_DAYS",
        default_value_t = DEFAULT_HORIZON_DAYS,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_HORIZON_DAYS))
    )]
    pub days: u32,

    /// First day of the guide as YYYY-MM-DD (defaults to today in UTC)
    #[arg(short, long, env = "EPG_START_DATE")]
    pub start_date: Option<NaiveDate>,
}
