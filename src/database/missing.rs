//! Operations on the `ping_missing_reg` candidate table: members
//! provisionally flagged absent, pending the next cycle's reconfirmation.

use sqlx::PgPool;

/// Member ids flagged absent by the previous reconciliation cycle.
pub async fn candidates(pool: &PgPool) -> sqlx::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT user_id FROM ping_missing_reg")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Replaces the candidate set wholesale. The delete and the inserts share a
/// transaction so a half-replaced set is never visible.
pub async fn replace_candidates(pool: &PgPool, user_ids: &[String]) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM ping_missing_reg")
        .execute(&mut *tx)
        .await?;
    for user_id in user_ids {
        sqlx::query("INSERT INTO ping_missing_reg (user_id) VALUES ($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

pub async fn clear(pool: &PgPool) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM ping_missing_reg")
        .execute(pool)
        .await?;
    Ok(())
}
