//! Process-wide tracing setup shared by the bot and the offline tools.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the fmt subscriber.
///
/// Defaults to `info` for this crate with serenity's own chatter capped at
/// `warn`; `RUST_LOG` overrides the whole filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn,sqlx=warn"));
    fmt().with_env_filter(filter).with_target(false).init();
}
