//! Moderator broadcast: ping every member registered for the given areas.

use sqlx::PgPool;

use crate::batcher::build_chunks;
use crate::database::registrations;
use crate::error::BotError;
use crate::fsa;

/// Builds the outbound ping chunks for the requested areas.
///
/// Zero chunks means no one is registered for any of them; the caller
/// reports "no one to ping" rather than sending nothing. The broadcast
/// ceiling is checked against the deduplicated set, independently of the
/// parse ceiling that bounds storage writes.
pub async fn run(
    pool: &PgPool,
    invoker_mention: &str,
    raw_fsas: &[&str],
    parse_ceiling: usize,
    fanout_ceiling: usize,
    max_len: usize,
) -> Result<Vec<String>, BotError> {
    if raw_fsas.is_empty() {
        return Err(BotError::MissingArgument("an area code (ex: K1P)"));
    }
    let fsas = fsa::parse_many(raw_fsas, parse_ceiling)?;
    if fsas.len() > fanout_ceiling {
        return Err(BotError::TooManyPingTargets);
    }

    let members = registrations::members_for_fsas(pool, &fsas).await?;
    let mentions: Vec<String> = members.iter().map(|id| format!("<@{id}>")).collect();
    let prefix = format!("{invoker_mention} is pinging ");
    // Leave room for the closing '!' appended to every chunk.
    let chunks = build_chunks(&prefix, &mentions, max_len.saturating_sub(1));
    Ok(chunks.into_iter().map(|chunk| format!("{chunk}!")).collect())
}
