//! Knowledge updates injected by the user at chat time.
//!
//! An update payload is wrapped in a document tagged `ai-update` with the
//! current time, chunked with the same configuration as initial ingestion,
//! and appended to the vector index. Later queries resolve conflicts with
//! older facts by timestamp priority; nothing is retracted or rewritten.

use anyhow::Result;
use chrono::Utc;

use crate::chunk::Chunker;
use crate::index::VectorIndex;
use crate::models::Document;

/// Source label for documents created from chat updates.
pub const UPDATE_SOURCE: &str = "ai-update";

/// Confirmation returned after a successful update.
pub const UPDATE_ACK: &str = "Information received and stored in my memory.";

/// Reply when the classifier flagged an update but no payload survived.
pub const EMPTY_UPDATE_REPLY: &str = "There was nothing new to store.";

/// Insert `update_info` into the index and return the acknowledgment.
///
/// A `None` payload is the classifier's no-op case: the index is left
/// untouched and the empty-update reply is returned. An index failure
/// propagates to the caller; the failed update leaves the index unchanged.
pub async fn apply(
    index: &VectorIndex,
    chunker: &Chunker,
    update_info: Option<&str>,
) -> Result<String> {
    let Some(info) = update_info else {
        eprintln!("warning: update info is empty, skipping update");
        return Ok(EMPTY_UPDATE_REPLY.to_string());
    };

    let document = Document::new(info, UPDATE_SOURCE, Utc::now());
    index.insert(chunker.split(&document)).await?;

    Ok(UPDATE_ACK.to_string())
}
