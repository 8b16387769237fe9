//! Core data models used throughout ragline.
//!
//! These types represent the documents and chunks that flow through the
//! ingestion and retrieval pipeline.

use chrono::{DateTime, Utc};

/// Provenance metadata attached to a [`Document`] and inherited by every
/// chunk split from it.
#[derive(Debug, Clone)]
pub struct DocMetadata {
    /// Source label (e.g. a file path, or `"ai-update"` for injected facts).
    pub source: String,
    /// When the document entered the system. Drives recency priority at
    /// answer time.
    pub timestamp: DateTime<Utc>,
}

/// A unit of ingested text. Immutable once created.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub metadata: DocMetadata,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            metadata: DocMetadata {
                source: source.into(),
                timestamp,
            },
        }
    }
}

/// A contiguous slice of a document's content. Chunks are the unit of
/// embedding and storage; each carries its parent document's metadata
/// verbatim.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: String,
    pub chunk_index: i64,
    pub text: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    /// SHA-256 of the chunk text, for staleness detection and debugging.
    pub hash: String,
}

/// A chunk returned from the vector index, annotated with its cosine
/// similarity to the query embedding.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}
