pub mod db_todo_driven_ports;
pub mod in_memory_todo_driven_ports;

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Opens a pool of PostgreSQL connections for the given connection URL
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, anyhow::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(2))
        .connect(db_url)
        .await
        .context("connecting to the todo database")
}

/// Brings the database schema up to date with the migrations embedded in the binary
pub async fn run_migrations(db: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("applying database migrations")?;

    Ok(())
}
