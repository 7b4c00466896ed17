use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    db::{PieceStore, SortOrder},
    error::StoreError,
    models::{Piece, PieceId},
};

struct StoredPiece {
    id: PieceId,
    group: String,
    piece: Piece,
}

/// In-process piece store. Reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct MemoryPieceStore {
    pieces: RwLock<Vec<StoredPiece>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryPieceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Every piece of `group`, oldest insert first
    pub async fn all(&self, group: &str) -> Vec<(PieceId, Piece)> {
        let pieces = self.pieces.read().await;
        pieces
            .iter()
            .filter(|stored| stored.group == group)
            .map(|stored| (stored.id.clone(), stored.piece.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.pieces.read().await.len()
    }
}

#[async_trait]
impl PieceStore for MemoryPieceStore {
    async fn query(
        &self,
        group: &str,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<Piece>, StoreError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("query rejected".to_string()));
        }

        let pieces = self.pieces.read().await;
        let in_group = pieces.iter().filter(|stored| stored.group == group);

        // Stable sorts keep equal dates in insertion order for the direction asked
        let mut matching: Vec<Piece> = match order {
            SortOrder::DateAscending => {
                let mut matching: Vec<Piece> = in_group.map(|s| s.piece.clone()).collect();
                matching.sort_by(|a, b| a.date.cmp(&b.date));
                matching
            }
            SortOrder::DateDescending => {
                let mut matching: Vec<Piece> = in_group.rev().map(|s| s.piece.clone()).collect();
                matching.sort_by(|a, b| b.date.cmp(&a.date));
                matching
            }
        };
        matching.truncate(limit);

        Ok(matching)
    }

    async fn insert(&self, group: &str, piece: &Piece) -> Result<PieceId, StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("insert rejected".to_string()));
        }

        let id = PieceId::generate();
        let mut pieces = self.pieces.write().await;
        pieces.push(StoredPiece {
            id: id.clone(),
            group: group.to_string(),
            piece: piece.clone(),
        });

        Ok(id)
    }
}
