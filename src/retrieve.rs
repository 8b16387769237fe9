//! Context retrieval for query turns.

use anyhow::Result;

use crate::index::VectorIndex;
use crate::models::ScoredChunk;

/// Fetch the top-K chunks most relevant to `question`.
///
/// Pure delegation to the index; no filtering, reranking, or
/// deduplication happens here.
pub async fn retrieve(
    index: &VectorIndex,
    question: &str,
    top_k: usize,
) -> Result<Vec<ScoredChunk>> {
    index.query(question, top_k).await
}
