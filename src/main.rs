//! `sample_epg` binary: generates `public/guide.xml` from `channels.json`.
//!
//! ```sh
//! sample_epg -c channels.json -o public/guide.xml
//! RUST_LOG=debug sample_epg --days 3 --start-date 2024-01-01
//! ```
//!
//! Exits with status 0 after the guide is written, 1 on any failure.

use clap::Parser;
use sample_epg::{Cli, run};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("sample_epg starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match run(&args).await {
        Ok(path) => {
            let elapsed = start_time.elapsed();
            info!(?elapsed, "Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Error generating XMLTV");
            ExitCode::FAILURE
        }
    }
}
