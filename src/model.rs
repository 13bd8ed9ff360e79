//! Shared state stored in serenity's global TypeMap.

use std::sync::Arc;

use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;
use sqlx::PgPool;

use crate::config::Config;

/// A container for the ShardManager, used by the one-shot tools to
/// disconnect cleanly once their work is done.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// The central, shared state of the bot: the connection pool and the loaded
/// configuration. An `Arc<AppState>` is inserted into the global context at
/// startup and torn down with the client.
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
