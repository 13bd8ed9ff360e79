//! Monitors the registration table and exports it in a human-readable form
//! whenever new rows appear.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;

use postal_pinger_bot::config::Config;
use postal_pinger_bot::database::{self, registrations};
use postal_pinger_bot::{export, logging};

/// Monitors the registrations and exports them in a human-readable form.
#[derive(Parser, Debug)]
#[command(name = "monitor-and-export", version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(long)]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = Config::load(&cli.config_path)?;
    let output_dir = config
        .export_output_dir
        .clone()
        .context("export_output_dir must be set in the config")?;
    let interval = Duration::from_secs(config.monitoring_interval_secs);

    let pool = database::connect(&config.db_config)
        .await
        .context("connecting to the registration database")?;

    let mut last_id = -1i64;
    loop {
        let new_rows = registrations::count_after(&pool, last_id).await?;
        if new_rows > 0 {
            let rows = registrations::all_ordered_by_fsa(&pool).await?;
            if let Some(max_id) = export::export_snapshot(&output_dir, &rows)? {
                last_id = max_id;
            }
            info!(rows = rows.len(), last_id, "exported registration snapshot");
        }
        tokio::time::sleep(interval).await;
    }
}
