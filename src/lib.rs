//! # ragline
//!
//! A terminal RAG agent that answers questions strictly from a private
//! text corpus, and lets the user inject new facts at chat time with the
//! inline `[update]` tag.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Corpus /  │──▶│   Chunker    │──▶│ Vector Index │
//! │  Updates   │   │  (overlap)   │   │  (in-memory) │
//! └────────────┘   └──────────────┘   └──────┬───────┘
//!                                            │
//!        turn ─▶ classify ─┬─▶ update ───────┤ insert
//!                          └─▶ retrieve ─────┘ query
//!                                 │
//!                              generate ─▶ answer
//! ```
//!
//! Each turn runs through an explicit state machine ([`graph`]): intent
//! classification branches to either a knowledge update or retrieval plus
//! grounded generation. Conflicting facts are resolved at answer time by
//! timestamp priority — the index itself is append-only.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`chunk`] | Fixed-window text chunking with overlap |
//! | [`embedding`] | Embedding service trait and Ollama client |
//! | [`llm`] | Language model trait and Ollama client |
//! | [`index`] | In-memory append-only vector index |
//! | [`classify`] | Turn intent classification |
//! | [`update`] | Chat-time knowledge updates |
//! | [`retrieve`] | Top-K context retrieval |
//! | [`generate`] | Grounded answer generation |
//! | [`graph`] | Turn state machine |
//! | [`ingest`] | Startup corpus ingestion |

pub mod chunk;
pub mod classify;
pub mod config;
pub mod embedding;
pub mod generate;
pub mod graph;
pub mod index;
pub mod ingest;
pub mod llm;
pub mod models;
pub mod retrieve;
pub mod update;
