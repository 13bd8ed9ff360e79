//! Pool construction and schema bootstrap.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DbConfig;

/// A type alias for the database connection pool (`PgPool`), shared by the
/// bot and both offline tools.
pub type DbPool = PgPool;

/// Connects to Postgres with the configured parameters and makes sure the
/// registration tables exist.
pub async fn connect(cfg: &DbConfig) -> sqlx::Result<PgPool> {
    let options = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.pass)
        .database(&cfg.name);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

async fn ensure_schema(pool: &PgPool) -> sqlx::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS ping_reg(
            username TEXT NOT NULL,
            user_id TEXT NOT NULL,
            fsa TEXT NOT NULL,
            created_at TIMESTAMP(0) DEFAULT CURRENT_TIMESTAMP,
            id BIGSERIAL
        )",
    )
    .execute(pool)
    .await?;

    // Duplicate (member, fsa) inserts resolve against this index.
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS user_and_fsa ON ping_reg (user_id, fsa)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE TABLE IF NOT EXISTS ping_missing_reg(user_id TEXT NOT NULL)")
        .execute(pool)
        .await?;

    Ok(())
}
