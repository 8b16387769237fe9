//! Grounded answer generation.
//!
//! Assembles retrieved chunks into a single prompt and asks the language
//! model for the final answer. The prompt carries the binding policy of
//! the system: answer only from the supplied context, prefer the most
//! recent timestamp when facts conflict, refuse with a fixed sentence
//! when the context has no answer, and never leak source or timestamp
//! metadata into the reply.

use anyhow::Result;

use crate::llm::LanguageModel;
use crate::models::ScoredChunk;

/// The exact sentence returned when the context cannot answer the question.
pub const NO_ANSWER_REPLY: &str =
    "I do not have enough information to answer that question.";

/// Generate an answer for `question` grounded in `context`.
///
/// Runs even when the context is empty; the grounding rule then forces
/// the fixed insufficient-information sentence.
pub async fn generate(
    llm: &dyn LanguageModel,
    question: &str,
    context: &[ScoredChunk],
) -> Result<String> {
    let completion = llm.invoke(&grounded_prompt(question, context)).await?;
    Ok(completion.trim().to_string())
}

/// Build the grounded prompt: one context block in retrieval order, each
/// entry headed by its source and timestamp, followed by the rules and
/// the question.
pub fn grounded_prompt(question: &str, context: &[ScoredChunk]) -> String {
    let context_block = context
        .iter()
        .map(|sc| {
            format!(
                "Source: {} - Timestamp: {}\n{}",
                sc.chunk.source,
                sc.chunk.timestamp.to_rfc3339(),
                sc.chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert retrieval assistant. Your only job is to answer questions from the provided context.\n\
        Analyze the 'Context' below and answer the user's 'Question' precisely and concisely.\n\
        \n\
        You MUST follow these rules:\n\
        1. Base your answer STRICTLY on the 'Context'. Do not use any prior knowledge.\n\
        2. The context may contain information from different sources with different timestamps. If facts conflict, the information with the MOST RECENT timestamp is correct and must take priority.\n\
        3. If the answer cannot be found in the 'Context', respond EXACTLY with: \"{NO_ANSWER_REPLY}\" Do not guess.\n\
        4. NEVER mention the source or the timestamp in your final answer. The answer must be clean.\n\
        5. Be direct and objective.\n\
        \n\
        Context:\n\
        ---\n\
        {context_block}\n\
        ---\n\
        \n\
        Question: {question}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    fn scored(text: &str, source: &str, age_hours: i64) -> ScoredChunk {
        let doc = Document::new(text, source, Utc::now() - Duration::hours(age_hours));
        let chunks = crate::chunk::Chunker::new(1000, 200).unwrap().split(&doc);
        ScoredChunk {
            chunk: chunks.into_iter().next().unwrap(),
            score: 0.9,
        }
    }

    struct EchoModel;

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn invoke(&self, _prompt: &str) -> Result<String> {
            Ok("  The meeting is at 5pm.\n".to_string())
        }
    }

    #[test]
    fn test_prompt_carries_context_in_retrieval_order() {
        let context = vec![
            scored("Meeting is at 3pm", "notes.txt", 5),
            scored("Meeting is at 5pm", "ai-update", 1),
        ];
        let prompt = grounded_prompt("What time is the meeting?", &context);

        let first = prompt.find("Meeting is at 3pm").unwrap();
        let second = prompt.find("Meeting is at 5pm").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Source: notes.txt"));
        assert!(prompt.contains("Source: ai-update"));
        assert!(prompt.contains("Question: What time is the meeting?"));
    }

    #[test]
    fn test_prompt_embeds_each_timestamp() {
        let context = vec![scored("Meeting is at 3pm", "notes.txt", 5)];
        let prompt = grounded_prompt("when?", &context);
        assert!(prompt.contains(&format!(
            "Timestamp: {}",
            context[0].chunk.timestamp.to_rfc3339()
        )));
    }

    #[test]
    fn test_prompt_states_policy() {
        let prompt = grounded_prompt("anything", &[]);
        assert!(prompt.contains("MOST RECENT timestamp"));
        assert!(prompt.contains(NO_ANSWER_REPLY));
        assert!(prompt.contains("NEVER mention the source or the timestamp"));
    }

    #[tokio::test]
    async fn test_generate_trims_completion() {
        let answer = generate(&EchoModel, "when?", &[]).await.unwrap();
        assert_eq!(answer, "The meeting is at 5pm.");
    }
}
