//! One-shot bulk import of registrations from a dated spreadsheet.
//!
//! The spreadsheet header is `Date, FSA, FSA, ...`; cells after the first
//! column hold `@name#NNNN` tokens. Usernames are resolved against the
//! named guild over the gateway, so the tool logs in like the bot does,
//! imports once the cache is ready, and disconnects.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::gateway::GatewayIntents;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use sqlx::PgPool;
use tracing::{error, info, warn};

use postal_pinger_bot::config::Config;
use postal_pinger_bot::database::{self, registrations};
use postal_pinger_bot::model::ShardManagerContainer;
use postal_pinger_bot::{identity, import, logging};

/// Inserts registrations from a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "insert-from-spreadsheet", version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(long)]
    config_path: PathBuf,
    /// Path to the spreadsheet.
    #[arg(long)]
    spreadsheet_path: PathBuf,
    /// Name of the guild that members belong to.
    #[arg(long)]
    guild_name: String,
}

struct ImportHandler {
    pool: PgPool,
    spreadsheet_path: PathBuf,
    guild_name: String,
}

#[async_trait]
impl EventHandler for ImportHandler {
    async fn cache_ready(&self, ctx: Context, _guilds: Vec<GuildId>) {
        info!("cache ready, starting import");
        match run_import(&ctx, self).await {
            Ok(inserted) => info!(inserted, "import finished"),
            Err(e) => error!(error = %e, "import failed"),
        }
        // One-shot tool: disconnect once the import attempt finishes.
        let data = ctx.data.read().await;
        if let Some(manager) = data.get::<ShardManagerContainer>() {
            manager.shutdown_all().await;
        }
    }
}

async fn run_import(ctx: &Context, handler: &ImportHandler) -> anyhow::Result<usize> {
    let guild_id = ctx
        .cache
        .guilds()
        .into_iter()
        .find(|id| {
            ctx.cache
                .guild(*id)
                .is_some_and(|guild| guild.name == handler.guild_name)
        })
        .context("guild not found")?;

    let mut reader = csv::Reader::from_path(&handler.spreadsheet_path)?;
    let fields: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let fsas = import::parse_header(&fields).context("invalid FSA in the header row")?;

    let mut inserted = 0usize;
    for record in reader.records() {
        let row: Vec<String> = record?.iter().map(str::to_string).collect();
        let Some(raw_timestamp) = row.first() else {
            continue;
        };
        let created_at = match import::parse_timestamp(raw_timestamp) {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "skipping row with unparseable timestamp");
                continue;
            }
        };

        let (entries, skipped) = import::parse_row(&fsas, &row);
        for reason in skipped {
            warn!(%reason, "skipped cell");
        }
        for entry in entries {
            match identity::resolve(ctx, guild_id, &entry.username).await {
                Ok(member) => {
                    registrations::add_with_created_at(
                        &handler.pool,
                        &member.user_id.to_string(),
                        &member.display,
                        &entry.fsa,
                        created_at,
                    )
                    .await?;
                    inserted += 1;
                }
                Err(e) => warn!(user = %entry.username, error = %e, "skipping unresolvable member"),
            }
        }
    }
    Ok(inserted)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = Config::load(&cli.config_path)?;

    let pool = database::connect(&config.db_config)
        .await
        .context("connecting to the registration database")?;

    // Members intent so usernames can be resolved against the guild.
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(ImportHandler {
            pool,
            spreadsheet_path: cli.spreadsheet_path,
            guild_name: cli.guild_name,
        })
        .await
        .context("creating the Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
    }

    client.start().await.context("running the Discord client")?;
    Ok(())
}
