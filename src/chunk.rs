//! Fixed-window text chunker with overlap.
//!
//! Splits document content into chunks of at most `chunk_size` characters,
//! with consecutive chunks sharing exactly `chunk_overlap` characters. The
//! windowing is exact: concatenating the chunks with the overlap prefix
//! removed reconstructs the original content. The same configuration is
//! applied to initial corpus ingestion and to every later update.
//!
//! Each chunk receives a random UUID plus a SHA-256 hash of its text.

use anyhow::{bail, Result};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::{Chunk, Document};

/// Splits documents into overlapping fixed-size chunks.
///
/// Construction fails with an error when `chunk_overlap >= chunk_size`,
/// since the window would never advance.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            bail!("Invalid chunking config: chunk_size must be positive");
        }
        if chunk_overlap >= chunk_size {
            bail!(
                "Invalid chunking config: chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap,
                chunk_size
            );
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split a document into chunks carrying the parent metadata verbatim.
    ///
    /// Content shorter than `chunk_size` (including empty content) yields
    /// exactly one chunk. Chunk indices are contiguous starting at 0.
    pub fn split(&self, doc: &Document) -> Vec<Chunk> {
        let content = doc.content.as_str();

        // Character-boundary byte offsets; sizes are measured in chars so
        // multi-byte text never splits mid-character.
        let mut offsets: Vec<usize> = content.char_indices().map(|(i, _)| i).collect();
        offsets.push(content.len());
        let n_chars = offsets.len() - 1;

        if n_chars <= self.chunk_size {
            return vec![make_chunk(doc, 0, content)];
        }

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0usize;
        loop {
            let end = (start + self.chunk_size).min(n_chars);
            let text = &content[offsets[start]..offsets[end]];
            chunks.push(make_chunk(doc, chunks.len() as i64, text));
            if end == n_chars {
                break;
            }
            start += step;
        }

        chunks
    }
}

fn make_chunk(doc: &Document, index: i64, text: &str) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    Chunk {
        id: Uuid::new_v4().to_string(),
        chunk_index: index,
        text: text.to_string(),
        source: doc.metadata.source.clone(),
        timestamp: doc.metadata.timestamp,
        hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(content: &str) -> Document {
        Document::new(content, "test.txt", Utc::now())
    }

    /// Rebuild the original content from chunks by stripping the overlap
    /// prefix from every chunk after the first.
    fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
        let mut out = String::new();
        for (i, c) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(&c.text);
            } else {
                out.extend(c.text.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Chunker::new(100, 100).is_err());
        assert!(Chunker::new(100, 150).is_err());
        assert!(Chunker::new(0, 0).is_err());
        assert!(Chunker::new(100, 0).is_ok());
        assert!(Chunker::new(100, 99).is_ok());
    }

    #[test]
    fn test_short_content_single_chunk() {
        let chunker = Chunker::new(1000, 200).unwrap();
        let chunks = chunker.split(&doc("Hello, world!"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].text, "Hello, world!");
    }

    #[test]
    fn test_empty_content_single_chunk() {
        let chunker = Chunker::new(1000, 200).unwrap();
        let chunks = chunker.split(&doc(""));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
    }

    #[test]
    fn test_coverage_reconstructs_content() {
        let content: String = (0..37)
            .map(|i| format!("Sentence number {} of the corpus. ", i))
            .collect();
        for (size, overlap) in [(50, 10), (64, 0), (100, 99), (7, 3)] {
            let chunker = Chunker::new(size, overlap).unwrap();
            let chunks = chunker.split(&doc(&content));
            assert_eq!(
                reconstruct(&chunks, overlap),
                content,
                "coverage broken for size={} overlap={}",
                size,
                overlap
            );
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let content = "abcdefghijklmnopqrstuvwxyz";
        let chunker = Chunker::new(10, 4).unwrap();
        let chunks = chunker.split(&doc(content));
        for pair in chunks.windows(2) {
            let tail: String = pair[0].text.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            assert!(pair[1].text.starts_with(&tail));
        }
    }

    #[test]
    fn test_metadata_propagated_verbatim() {
        let ts = Utc::now();
        let document = Document::new("x".repeat(500), "corpus.txt", ts);
        let chunker = Chunker::new(100, 20).unwrap();
        for chunk in chunker.split(&document) {
            assert_eq!(chunk.source, "corpus.txt");
            assert_eq!(chunk.timestamp, ts);
        }
    }

    #[test]
    fn test_chunk_indices_contiguous() {
        let content = "word ".repeat(200);
        let chunker = Chunker::new(50, 10).unwrap();
        let chunks = chunker.split(&doc(&content));
        assert!(chunks.len() > 1);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.chunk_index, i as i64);
        }
    }

    #[test]
    fn test_multibyte_content_respects_char_boundaries() {
        let content = "áéíóú".repeat(40);
        let chunker = Chunker::new(30, 5).unwrap();
        let chunks = chunker.split(&doc(&content));
        assert_eq!(reconstruct(&chunks, 5), content);
    }

    #[test]
    fn test_deterministic_hashes() {
        let content = "alpha beta gamma delta ".repeat(20);
        let chunker = Chunker::new(40, 8).unwrap();
        let a = chunker.split(&doc(&content));
        let b = chunker.split(&doc(&content));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.text, y.text);
            assert_eq!(x.hash, y.hash);
        }
    }
}
