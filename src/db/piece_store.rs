use async_trait::async_trait;
use chrono::DateTime;
use sqlx::FromRow;

use crate::{
    db::{DbPool, PieceStore, SortOrder},
    error::StoreError,
    models::{Piece, PieceId},
};

/// Row layout of the `pieces` table
#[derive(Debug, FromRow)]
struct PieceRow {
    id: String,
    added_by: String,
    description: String,
    quantity: i64,
    date: i64,
}

impl TryFrom<PieceRow> for Piece {
    type Error = StoreError;

    fn try_from(row: PieceRow) -> Result<Self, Self::Error> {
        let date = DateTime::from_timestamp_micros(row.date)
            .ok_or(StoreError::InvalidDate { id: row.id })?;

        Ok(Piece {
            added_by: row.added_by,
            description: row.description,
            quantity: row.quantity,
            date,
        })
    }
}

/// Piece store backed by SQLite
pub struct SqlitePieceStore {
    pool: DbPool,
}

impl SqlitePieceStore {
    /// Create a new SqlitePieceStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PieceStore for SqlitePieceStore {
    async fn query(
        &self,
        group: &str,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<Piece>, StoreError> {
        // rowid breaks ties so equal dates come back in insertion order
        let sql = match order {
            SortOrder::DateDescending => {
                r#"
                SELECT id, added_by, description, quantity, date FROM pieces
                WHERE piece_group = ?
                ORDER BY date DESC, rowid DESC
                LIMIT ?
                "#
            }
            SortOrder::DateAscending => {
                r#"
                SELECT id, added_by, description, quantity, date FROM pieces
                WHERE piece_group = ?
                ORDER BY date ASC, rowid ASC
                LIMIT ?
                "#
            }
        };

        let rows = sqlx::query_as::<_, PieceRow>(sql)
            .bind(group)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Piece::try_from).collect()
    }

    async fn insert(&self, group: &str, piece: &Piece) -> Result<PieceId, StoreError> {
        let id = PieceId::generate();

        sqlx::query(
            r#"
            INSERT INTO pieces (id, piece_group, added_by, description, quantity, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id.0)
        .bind(group)
        .bind(&piece.added_by)
        .bind(&piece.description)
        .bind(piece.quantity)
        .bind(piece.date.timestamp_micros())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }
}
