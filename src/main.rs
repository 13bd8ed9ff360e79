use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::info;

use postal_pinger_bot::config::Config;
use postal_pinger_bot::database;
use postal_pinger_bot::handler::Handler;
use postal_pinger_bot::logging;
use postal_pinger_bot::model::{AppState, ShardManagerContainer};

/// Bot for pinging users in postal areas.
#[derive(Parser, Debug)]
#[command(name = "postal-pinger-bot", version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(long)]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = Arc::new(Config::load(&cli.config_path)?);

    let db = database::connect(&config.db_config)
        .await
        .context("connecting to the registration database")?;

    // The members intent is needed to resolve users by username and to
    // check presence during reconciliation.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new())
        .await
        .context("creating the Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        data.insert::<AppState>(Arc::new(AppState {
            db,
            config: config.clone(),
        }));
    }

    info!("starting Discord client");
    client.start().await.context("running the Discord client")?;
    Ok(())
}
