//! Operations on the `ping_reg` subscription table.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use sqlx::PgPool;

use super::models::Registration;
use crate::fsa::Fsa;

/// Registers the member for every FSA in the set, one row per code.
///
/// Existing (member, fsa) pairs are left untouched via `ON CONFLICT DO
/// NOTHING`, so repeat adds are no-ops rather than errors. The batch runs in
/// a single transaction so a partially applied add is never visible.
pub async fn add(
    pool: &PgPool,
    user_id: &str,
    username: &str,
    fsas: &HashSet<Fsa>,
) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for fsa in fsas {
        sqlx::query(
            "INSERT INTO ping_reg (username, user_id, fsa) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, fsa) DO NOTHING",
        )
        .bind(username)
        .bind(user_id)
        .bind(fsa.as_str())
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

/// Insert variant used by the spreadsheet import, carrying the
/// spreadsheet's own submission timestamp instead of the column default.
pub async fn add_with_created_at(
    pool: &PgPool,
    user_id: &str,
    username: &str,
    fsa: &Fsa,
    created_at: NaiveDateTime,
) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO ping_reg (username, user_id, fsa, created_at) VALUES ($1, $2, $3, $4)
         ON CONFLICT (user_id, fsa) DO NOTHING",
    )
    .bind(username)
    .bind(user_id)
    .bind(fsa.as_str())
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Deletes the member's rows restricted to the given FSA set. Rows that
/// don't exist are silently ignored.
pub async fn remove(pool: &PgPool, user_id: &str, fsas: &HashSet<Fsa>) -> sqlx::Result<()> {
    let codes: Vec<String> = fsas.iter().map(|f| f.as_str().to_string()).collect();
    sqlx::query("DELETE FROM ping_reg WHERE user_id = $1 AND fsa = ANY($2)")
        .bind(user_id)
        .bind(&codes)
        .execute(pool)
        .await?;
    Ok(())
}

/// Deletes every row for the member.
pub async fn purge(pool: &PgPool, user_id: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM ping_reg WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// The member's codes in canonical uppercase, ordered. An empty vec means
/// the member has no registrations; it is not an error.
pub async fn fsas_for_member(pool: &PgPool, user_id: &str) -> sqlx::Result<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT fsa FROM ping_reg WHERE user_id = $1 ORDER BY fsa")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(fsa,)| fsa.to_uppercase()).collect())
}

/// Distinct members registered for at least one of the FSAs, ordered so
/// broadcast chunking is deterministic.
pub async fn members_for_fsas(pool: &PgPool, fsas: &HashSet<Fsa>) -> sqlx::Result<Vec<String>> {
    let codes: Vec<String> = fsas.iter().map(|f| f.as_str().to_string()).collect();
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT user_id FROM ping_reg WHERE fsa = ANY($1) ORDER BY user_id")
            .bind(&codes)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Every member id with at least one registration.
pub async fn all_distinct_members(pool: &PgPool) -> sqlx::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT DISTINCT user_id FROM ping_reg")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Bulk purge used by the reconciler. Returns the number of rows deleted.
pub async fn delete_members(pool: &PgPool, user_ids: &[String]) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM ping_reg WHERE user_id = ANY($1)")
        .bind(user_ids)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// The full table ordered by FSA then insert order, for the export tool.
pub async fn all_ordered_by_fsa(pool: &PgPool) -> sqlx::Result<Vec<Registration>> {
    sqlx::query_as(
        "SELECT username, user_id, fsa, created_at, id FROM ping_reg ORDER BY fsa, id",
    )
    .fetch_all(pool)
    .await
}

/// Number of rows inserted after `last_id`; drives the export poll.
pub async fn count_after(pool: &PgPool, last_id: i64) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ping_reg WHERE id > $1")
        .bind(last_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
