//! Periodic pruning of subscribers who are no longer a member of any guild
//! the bot serves.
//!
//! Deletion takes two consecutive cycles: a member absent at cycle N is only
//! flagged as a candidate; the purge happens at cycle N+1 if they are still
//! absent at the confirmation check. A transient membership-cache glitch
//! therefore never deletes anyone on its own.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serenity::client::Context;
use sqlx::PgPool;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::database::{missing, registrations};
use crate::model::AppState;

/// The subset of `member_ids` absent from the present set. Used both to
/// confirm last cycle's candidates and to compute the next candidate set.
pub fn absent_members(member_ids: &[String], present: &HashSet<String>) -> Vec<String> {
    member_ids
        .iter()
        .filter(|id| !present.contains(*id))
        .cloned()
        .collect()
}

/// One full two-pass cycle against the given present-member set.
///
/// Pass 1 re-checks the previous cycle's candidates and purges those still
/// absent; pass 2 rebuilds the candidate set from the current registrations,
/// fully replacing the old one.
pub async fn run_cycle(pool: &PgPool, present: &HashSet<String>) -> sqlx::Result<()> {
    let previous = missing::candidates(pool).await?;
    let confirmed = absent_members(&previous, present);
    if !confirmed.is_empty() {
        let rows = registrations::delete_members(pool, &confirmed).await?;
        info!(members = confirmed.len(), rows, "purged confirmed-missing members");
    }
    missing::clear(pool).await?;

    let registered = registrations::all_distinct_members(pool).await?;
    let candidates = absent_members(&registered, present);
    missing::replace_candidates(pool, &candidates).await?;
    if !candidates.is_empty() {
        info!(members = candidates.len(), "flagged missing members pending reconfirmation");
    }
    Ok(())
}

/// Spawns the reconciliation timer task.
///
/// Ticks while the member cache is still empty are skipped; a failed cycle
/// is logged and swallowed so the next tick proceeds independently.
pub fn spawn(ctx: Context, state: Arc<AppState>) {
    let period = Duration::from_secs(state.config.reconciliation_interval_secs);
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let present = present_member_ids(&ctx);
            if present.is_empty() {
                debug!("member cache empty, skipping reconciliation cycle");
                continue;
            }
            if let Err(e) = run_cycle(&state.db, &present).await {
                error!(error = %e, "reconciliation cycle failed");
            }
        }
    });
}

/// Member ids present in ANY guild the bot serves. One registration table is
/// shared across guilds, so membership anywhere counts as present.
fn present_member_ids(ctx: &Context) -> HashSet<String> {
    let mut present = HashSet::new();
    for guild_id in ctx.cache.guilds() {
        if let Some(guild) = ctx.cache.guild(guild_id) {
            present.extend(guild.members.keys().map(|id| id.to_string()));
        }
    }
    present
}
