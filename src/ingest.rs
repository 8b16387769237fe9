//! Startup corpus ingestion.
//!
//! Reads the corpus file once, wraps it in the initial document, and
//! pushes it through chunking and embedding into the vector index.
//! Failure here is fatal: without a corpus there is nothing to answer
//! from.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Config;
use crate::graph::Agent;
use crate::models::Document;

/// Load the corpus file and index it.
pub async fn prepare(agent: &Agent, config: &Config) -> Result<()> {
    println!("Reading corpus file {}...", config.corpus.path.display());
    let content = std::fs::read_to_string(&config.corpus.path).with_context(|| {
        format!(
            "Failed to read corpus file: {}",
            config.corpus.path.display()
        )
    })?;

    let document = Document::new(content, config.corpus.source_label(), Utc::now());

    println!("Building the vector index...");
    let chunks = agent
        .ingest_document(&document)
        .await
        .context("Failed to index the corpus")?;

    println!("Indexed {} chunks.", chunks);
    Ok(())
}
