use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Sqlite, migrate::MigrateDatabase, sqlite::SqlitePoolOptions};
use std::time::Duration;

use crate::{
    error::StoreError,
    models::{Piece, PieceId},
};

pub mod memory_store;
pub mod piece_store;

pub use memory_store::MemoryPieceStore;
pub use piece_store::SqlitePieceStore;

pub type DbPool = Pool<Sqlite>;

/// Ordering applied to a group query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    DateAscending,
    DateDescending,
}

/// Storage collaborator for pieces. All reads and writes are scoped to a group.
#[async_trait]
pub trait PieceStore: Send + Sync {
    /// Pieces of `group` in `order`, at most `limit` of them
    async fn query(
        &self,
        group: &str,
        order: SortOrder,
        limit: usize,
    ) -> std::result::Result<Vec<Piece>, StoreError>;

    /// Store `piece` under `group` with a freshly generated id
    async fn insert(&self, group: &str, piece: &Piece) -> std::result::Result<PieceId, StoreError>;
}

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    // Create the database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    setup_database(&pool).await?;

    Ok(pool)
}

/// Set up the database schema
async fn setup_database(pool: &DbPool) -> Result<()> {
    // Dates are microseconds since the epoch so they order numerically
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pieces (
            id TEXT PRIMARY KEY NOT NULL,
            piece_group TEXT NOT NULL,
            added_by TEXT NOT NULL,
            description TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            date INTEGER NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
