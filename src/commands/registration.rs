//! Subscription commands: add, remove, purge and list. The moderator
//! variants reuse these with a target member resolved from a username
//! argument instead of the invoker.

use std::collections::HashSet;

use sqlx::PgPool;

use crate::batcher::build_chunks;
use crate::database::registrations;
use crate::error::BotError;
use crate::fsa::{self, Fsa};

/// Registers `user_id` for the given raw codes.
pub async fn add(
    pool: &PgPool,
    user_id: &str,
    username: &str,
    raw_fsas: &[&str],
    ceiling: usize,
) -> Result<(), BotError> {
    let fsas = parse_args(raw_fsas, ceiling)?;
    registrations::add(pool, user_id, username, &fsas).await?;
    Ok(())
}

/// Removes `user_id` from the given raw codes.
pub async fn remove(
    pool: &PgPool,
    user_id: &str,
    raw_fsas: &[&str],
    ceiling: usize,
) -> Result<(), BotError> {
    let fsas = parse_args(raw_fsas, ceiling)?;
    registrations::remove(pool, user_id, &fsas).await?;
    Ok(())
}

/// Removes `user_id` from everything.
pub async fn purge(pool: &PgPool, user_id: &str) -> Result<(), BotError> {
    registrations::purge(pool, user_id).await?;
    Ok(())
}

/// Chunked listing of the member's codes, prefixed with the invoker's
/// mention. Zero chunks means the member has no registrations; the caller
/// reports that case explicitly instead of staying silent.
pub async fn list(
    pool: &PgPool,
    user_id: &str,
    invoker_mention: &str,
    max_len: usize,
) -> Result<Vec<String>, BotError> {
    let fsas = registrations::fsas_for_member(pool, user_id).await?;
    let prefix = format!("{invoker_mention} ");
    Ok(build_chunks(&prefix, &fsas, max_len))
}

fn parse_args(raw_fsas: &[&str], ceiling: usize) -> Result<HashSet<Fsa>, BotError> {
    if raw_fsas.is_empty() {
        return Err(BotError::MissingArgument("an area code (ex: K1P)"));
    }
    fsa::parse_many(raw_fsas, ceiling)
}
