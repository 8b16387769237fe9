//! Per-turn orchestration as an explicit state machine.
//!
//! Each user turn flows through a small directed graph:
//!
//! ```text
//! start ─▶ classify_intent ──▶ update ──▶ end      (intent = update)
//!                         └──▶ retrieve ─▶ generate ─▶ end   (intent = query)
//! ```
//!
//! Nodes execute synchronously one at a time and each writes only the
//! [`TurnState`] fields it owns. The state is created fresh per turn and
//! discarded afterwards; there is no conversational memory beyond what
//! has been committed to the vector index. A node failure aborts the
//! turn and surfaces at the caller, leaving the agent usable for the
//! next turn.

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::classify::{self, Intent};
use crate::chunk::Chunker;
use crate::config::Config;
use crate::embedding::Embedder;
use crate::generate;
use crate::index::VectorIndex;
use crate::llm::LanguageModel;
use crate::models::{Document, ScoredChunk};
use crate::retrieve;
use crate::update;

/// Mutable record threaded through one conversational turn.
#[derive(Debug, Default)]
pub struct TurnState {
    pub question: String,
    pub intent: Intent,
    pub update_info: Option<String>,
    pub context: Vec<ScoredChunk>,
    pub answer: Option<String>,
}

impl TurnState {
    fn new(question: &str) -> Self {
        Self {
            question: question.to_string(),
            ..Default::default()
        }
    }
}

/// Graph nodes. `start` and `end` are implicit in the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    ClassifyIntent,
    Update,
    Retrieve,
    Generate,
}

/// The conversational agent: vector index, chunker, and service handles,
/// wired together by the turn state machine.
pub struct Agent {
    llm: Arc<dyn LanguageModel>,
    index: VectorIndex,
    chunker: Chunker,
    top_k: usize,
}

impl Agent {
    /// Build an agent from configuration and service handles.
    ///
    /// Fails when the chunking configuration is invalid; that is a
    /// construction-time error, not a per-turn one.
    pub fn new(
        config: &Config,
        llm: Arc<dyn LanguageModel>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let chunker = Chunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap)?;
        Ok(Self {
            llm,
            index: VectorIndex::new(embedder),
            chunker,
            top_k: config.retrieval.top_k,
        })
    }

    /// Chunk a document and insert it into the index.
    ///
    /// Used both by startup ingestion and by chat-time updates, so the
    /// chunking configuration is applied identically in both paths.
    /// Returns the number of chunks written.
    pub async fn ingest_document(&self, doc: &Document) -> Result<usize> {
        let chunks = self.chunker.split(doc);
        let count = chunks.len();
        self.index.insert(chunks).await?;
        Ok(count)
    }

    /// Number of entries currently in the vector index.
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    /// Run one full turn through the graph and return the answer.
    pub async fn run_turn(&self, question: &str) -> Result<String> {
        let mut state = TurnState::new(question);
        let mut node = Node::ClassifyIntent;

        loop {
            let next = self.run_node(node, &mut state).await?;
            match next {
                Some(n) => node = n,
                None => break,
            }
        }

        state
            .answer
            .ok_or_else(|| anyhow::anyhow!("Turn ended without producing an answer"))
    }

    /// Execute one node, writing only the fields it owns, and return the
    /// successor node (`None` = end).
    async fn run_node(&self, node: Node, state: &mut TurnState) -> Result<Option<Node>> {
        match node {
            Node::ClassifyIntent => {
                let result = classify::classify(self.llm.as_ref(), &state.question).await?;
                state.intent = result.intent;
                state.update_info = result.update_info;
                match state.intent {
                    Intent::Update => Ok(Some(Node::Update)),
                    Intent::Query => Ok(Some(Node::Retrieve)),
                    Intent::Unset => bail!("Classifier left intent unset"),
                }
            }
            Node::Update => {
                let answer =
                    update::apply(&self.index, &self.chunker, state.update_info.as_deref())
                        .await?;
                state.answer = Some(answer);
                Ok(None)
            }
            Node::Retrieve => {
                state.context =
                    retrieve::retrieve(&self.index, &state.question, self.top_k).await?;
                Ok(Some(Node::Generate))
            }
            Node::Generate => {
                let answer =
                    generate::generate(self.llm.as_ref(), &state.question, &state.context).await?;
                state.answer = Some(answer);
                Ok(None)
            }
        }
    }
}
