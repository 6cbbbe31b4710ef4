//! Prompt construction for every LLM call the core makes.
//!
//! Kept in one place so the call sites stay readable and the templates
//! can evolve without touching orchestration logic.

use sift_core::ChatMessage;

/// Answer returned when retrieval produced nothing at all.
pub const APOLOGY: &str = "I couldn't find any relevant documents for this query. \
     Try rephrasing it or narrowing it down.";

/// Preamble for the evidence-only answer used when the LLM is down.
pub const FALLBACK_PREAMBLE: &str =
    "I couldn't generate a grounded answer right now. The most relevant retrieved evidence:";

/// Appended to the answer when no live endpoint could be reached.
pub const REALTIME_NOTICE: &str = "Note: live program status could not be reached; \
     the answer reflects retrieved documents only.";

pub fn classify(query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "Classify the user's query into exactly one of: factual, search, realtime, multistep.\n\
             factual: asks for requirements, definitions, or eligibility rules.\n\
             search: general information lookup.\n\
             realtime: asks about current status, open applications, deadlines.\n\
             multistep: asks for a plan, strategy, or staged approach.\n\
             Reply with the single label only.",
        ),
        ChatMessage::user(query.to_string()),
    ]
}

pub fn hyde(query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "Write one short paragraph that could plausibly appear in an official document \
             answering the question below. Invent nothing beyond typical phrasing; the text is \
             used as a retrieval probe, not shown to anyone.",
        ),
        ChatMessage::user(query.to_string()),
    ]
}

pub fn variants(query: &str, n: usize) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "Rewrite the query below as {n} different search queries that could surface \
             relevant documents. One per line, no numbering, no commentary."
        )),
        ChatMessage::user(query.to_string()),
    ]
}

pub fn speculative_draft(query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "Draft a direct answer to the question below from your own knowledge. \
             It will be checked against retrieved evidence afterwards, so answer \
             plainly and flag anything you are unsure about.",
        ),
        ChatMessage::user(query.to_string()),
    ]
}

pub fn keywords(query: &str, draft: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "Extract a short space-separated keyword query for a document search that \
             would verify the draft answer below. Reply with the keywords only.",
        ),
        ChatMessage::user(format!("Question: {query}\n\nDraft answer: {draft}")),
    ]
}

pub fn critic(query: &str, context: &str, draft: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a strict reviewer of retrieved context for a question. Reply with a JSON \
             object only: {\"relevant\": 0-1, \"sufficient\": 0-1, \"confident\": 0-1, \
             \"action\": \"use\"|\"refine\"|\"retry_different\", \"gaps\": \"what is missing\"}.\n\
             relevant: does the context address the question at all.\n\
             sufficient: does it contain enough to answer fully.\n\
             confident: how sure you are in this assessment.\n\
             action refine: the query should be reworded and retried.\n\
             action retry_different: a different retrieval approach is needed.",
        ),
        ChatMessage::user(format!(
            "Question: {query}\n\nRetrieved context:\n{context}\n\nCandidate draft:\n{draft}"
        )),
    ]
}

pub fn reformulate(query: &str, gaps: Option<&str>) -> Vec<ChatMessage> {
    let mut prompt = format!(
        "The query below retrieved weak results. Rewrite it as one better search query. \
         Reply with the query only.\n\nQuery: {query}"
    );
    if let Some(gaps) = gaps {
        prompt.push_str(&format!("\nMissing from the results: {gaps}"));
    }
    vec![ChatMessage::user(prompt)]
}

pub fn final_answer(query: &str, context: &str, draft: Option<&str>) -> Vec<ChatMessage> {
    let mut user = format!("Question: {query}\n\nEvidence:\n{context}");
    if let Some(draft) = draft
        && !draft.is_empty()
    {
        user.push_str(&format!("\n\nEarlier draft to verify and correct:\n{draft}"));
    }
    vec![
        ChatMessage::system(
            "Answer the question using only the evidence provided. Cite concrete figures and \
             conditions from the evidence. If the evidence is incomplete, say what is missing \
             instead of guessing.",
        ),
        ChatMessage::user(user),
    ]
}
