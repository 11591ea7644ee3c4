//! # Sample EPG
//!
//! Generates a synthetic programme guide in XMLTV format from a static
//! channel list. Every channel gets the same three daily programmes for a
//! fixed number of days, so the output is deterministic for a given start
//! day.
//!
//! ## Architecture
//!
//! The application is a single linear pipeline:
//! 1. **Configuration**: Load and validate the channel list ([`config`])
//! 2. **Scheduling**: Generate the sample programmes ([`schedule`])
//! 3. **Serialization**: Build the XMLTV document ([`outputs::xmltv`])
//! 4. **Output**: Write the document to disk ([`outputs::file`])
//!
//! Any failure aborts the run with a [`GuideError`].

use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, instrument};

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod outputs;
pub mod schedule;
pub mod utils;

pub use cli::Cli;
pub use error::{GuideError, GuideResult};

use outputs::{file, xmltv};
use utils::start_of_day_utc;

/// Load channels, generate the schedule, and write the guide.
///
/// # Returns
///
/// The path of the written guide.
#[instrument(level = "info", skip_all, fields(channels = %args.channels.display(), output = %args.output.display()))]
pub async fn run(args: &Cli) -> GuideResult<PathBuf> {
    let channels = config::load_channels(&args.channels).await?;

    let reference_day = args
        .start_date
        .unwrap_or_else(|| start_of_day_utc(Utc::now()));
    info!(%reference_day, days = args.days, "Generating schedule");
    let schedule = schedule::generate(&channels, reference_day, args.days)?;

    let document = xmltv::emit(&channels, &schedule)?;
    file::persist(&document, &args.output).await?;

    Ok(args.output.clone())
}
