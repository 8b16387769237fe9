//! In-memory append-only vector index.
//!
//! Stores embedded chunks behind a `std::sync::RwLock` and serves top-K
//! queries by brute-force cosine similarity over all stored vectors.
//! There is no update-in-place or delete: superseding information is
//! resolved at answer time via timestamp priority, not by mutating
//! prior entries.

use std::sync::{Arc, RwLock};

use anyhow::{bail, Result};

use crate::embedding::{cosine_similarity, Embedder};
use crate::models::{Chunk, ScoredChunk};

struct IndexedEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// Append-only store of embedded chunks with top-K similarity query.
pub struct VectorIndex {
    embedder: Arc<dyn Embedder>,
    entries: RwLock<Vec<IndexedEntry>>,
}

impl VectorIndex {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Embed the given chunks and append them to the index.
    ///
    /// Embedding happens before the write lock is taken, so a failed
    /// embedding call leaves the index unchanged.
    pub async fn insert(&self, chunks: Vec<Chunk>) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;
        if vectors.len() != chunks.len() {
            bail!(
                "Indexing failed: {} chunks but {} embeddings",
                chunks.len(),
                vectors.len()
            );
        }

        let mut entries = self.entries.write().unwrap();
        for (chunk, embedding) in chunks.into_iter().zip(vectors) {
            entries.push(IndexedEntry { chunk, embedding });
        }
        Ok(())
    }

    /// Return up to `k` stored chunks ranked by similarity to `text`,
    /// best first. Ties keep insertion order (earlier entry wins).
    ///
    /// An empty index yields an empty result, not an error.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self.embedder.embed(text).await?;

        let entries = self.entries.read().unwrap();
        let mut scored: Vec<ScoredChunk> = entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(&query_vec, &entry.embedding),
            })
            .collect();

        // Stable sort keeps insertion order within equal scores.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        Ok(scored)
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
