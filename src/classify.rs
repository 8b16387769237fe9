//! Intent classification for a single conversational turn.
//!
//! A turn is either a `query` against the corpus or an `update` injecting
//! a new fact, signalled by the literal `[update]` tag in the input. The
//! classifier is a thin wrapper over one deterministic language model call
//! with a fixed few-shot prompt; the raw completion is trimmed and
//! case-folded to one of the two labels.

use anyhow::Result;

use crate::llm::LanguageModel;

/// The literal tag that marks a turn as a knowledge update.
pub const UPDATE_TAG: &str = "[update]";

/// Turn intent. `Unset` only exists before classification runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    #[default]
    Unset,
    Query,
    Update,
}

/// Classifier output: the intent plus the update payload when applicable.
///
/// `update_info` is `Some` if and only if the intent is `Update` and the
/// input actually carried a non-empty payload around the tag.
#[derive(Debug, Clone)]
pub struct Classification {
    pub intent: Intent,
    pub update_info: Option<String>,
}

/// Classify one user turn.
///
/// A completion that normalizes to neither label is logged and treated as
/// `query` — a wrong branch there degrades one answer, while crashing the
/// turn would drop it entirely.
pub async fn classify(llm: &dyn LanguageModel, question: &str) -> Result<Classification> {
    let completion = llm.invoke(&classifier_prompt(question)).await?;

    let intent = match parse_label(&completion) {
        Some(intent) => intent,
        None => {
            eprintln!(
                "warning: classifier returned {:?}, defaulting to query",
                completion.trim()
            );
            Intent::Query
        }
    };

    let update_info = match intent {
        Intent::Update => {
            let payload = strip_update_tag(question);
            if payload.is_none() {
                eprintln!("warning: update intent without usable payload, update will be skipped");
            }
            payload
        }
        _ => None,
    };

    Ok(Classification {
        intent,
        update_info,
    })
}

/// Normalize a raw completion (trim + case-fold) to an intent label.
pub fn parse_label(completion: &str) -> Option<Intent> {
    match completion.trim().to_lowercase().as_str() {
        "query" => Some(Intent::Query),
        "update" => Some(Intent::Update),
        _ => None,
    }
}

/// Remove the `[update]` tag from the input and trim the remainder.
///
/// Returns `None` when the tag is absent or nothing remains after it.
pub fn strip_update_tag(question: &str) -> Option<String> {
    if !question.contains(UPDATE_TAG) {
        return None;
    }
    let payload = question.replacen(UPDATE_TAG, "", 1).trim().to_string();
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

/// Fixed few-shot prompt for the classification call.
fn classifier_prompt(question: &str) -> String {
    format!(
        "You are a precise intent classifier. Your task is to classify the user's intent based on a specific tag.\n\
        You must follow these rules strictly:\n\
        1. If the input text contains the exact tag '[update]', you MUST respond with 'update'.\n\
        2. For any other input, you MUST respond with 'query'.\n\
        \n\
        This is a classification task. Do not interpret the meaning of the words; only check for the presence of the '[update]' tag.\n\
        \n\
        Here are some examples:\n\
        \n\
        Input: [update] The project deadline is tomorrow.\n\
        Output: update\n\
        \n\
        Input: Can you update me on the project status?\n\
        Output: query\n\
        \n\
        Input: What is the project status?\n\
        Output: query\n\
        \n\
        Input: [update] New team member: John Doe.\n\
        Output: update\n\
        \n\
        Now, classify the following input.\n\
        \n\
        Input: {question}\n\
        Output:"
    )
}
