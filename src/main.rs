//! # ragline CLI
//!
//! Interactive surface for the RAG agent. Reads one line per turn, feeds
//! it through the turn graph, and prints the answer. Typing `exit` ends
//! the session.
//!
//! ```bash
//! ragline chat                          # interactive session
//! ragline ask "What is the deadline?"   # one-shot turn
//! ragline --config ./config/ragline.toml chat
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ragline::config::load_config;
use ragline::embedding::OllamaEmbedder;
use ragline::graph::Agent;
use ragline::ingest;
use ragline::llm::OllamaChat;

/// Reserved input that ends an interactive session.
const EXIT_COMMAND: &str = "exit";

/// ragline — a terminal RAG agent grounded in a private text corpus.
///
/// All settings are read from a TOML configuration file; every field has
/// a default, so the agent runs against a local Ollama out of the box.
#[derive(Parser)]
#[command(
    name = "ragline",
    about = "A terminal RAG agent that answers from a private corpus and learns new facts inline",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/ragline.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session.
    ///
    /// Each line is one turn. Prefix a line with `[update]` to store a
    /// new fact instead of asking a question. Type `exit` to quit.
    Chat,

    /// Ask a single question and print the answer.
    Ask {
        /// The question (or `[update] ...` fact) to process.
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let llm = Arc::new(OllamaChat::new(&config.ollama)?);
    let embedder = Arc::new(OllamaEmbedder::new(&config.ollama)?);
    let agent = Agent::new(&config, llm, embedder)?;

    ingest::prepare(&agent, &config).await?;

    match cli.command {
        Commands::Chat => run_chat(&agent).await,
        Commands::Ask { question } => {
            let answer = agent.run_turn(&question).await?;
            println!("{}", answer);
            Ok(())
        }
    }
}

/// Interactive loop: one turn per line until `exit` or EOF.
///
/// A failed turn is reported and the loop continues; turn state is never
/// shared between turns, so one failure cannot poison the next.
async fn run_chat(agent: &Agent) -> Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    if interactive {
        println!("Ready. Ask questions, or prefix a line with [update] to store a new fact.");
        println!("Type '{}' to quit.", EXIT_COMMAND);
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("You: ");
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?;
        let trimmed = input.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }

        match agent.run_turn(trimmed).await {
            Ok(answer) => println!("AI: {}", answer),
            Err(e) => eprintln!("Turn failed: {:#}", e),
        }
    }

    if interactive {
        println!("Goodbye!");
    }
    Ok(())
}
