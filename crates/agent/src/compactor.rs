//! History compaction into bounded message lists for the generation call.
//!
//! The last `window_size` turns are kept verbatim. Everything older becomes
//! one synthetic leading message: a summarizer-written summary when the
//! collaborator answers in time, otherwise a deterministic local digest.
//! Either way the output has the same shape, and never more than
//! `window_size + 2` messages.

use std::time::Duration;

use enrollwise_config::EnrollConfig;
use enrollwise_core::{CollaboratorError, NormalizedText, Summarizer, Turn, bounded};
use enrollwise_funnel::lexicon::{
    ENROLLMENT_INTENT, NEW_JERSEY_LOCATIONS, NEW_YORK_LOCATIONS, PAYMENT_KEYWORDS,
    PRICING_KEYWORDS, PROGRAM_CATEGORIES,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Instruction prepended to the older conversation when asking for a summary.
pub const SUMMARY_INSTRUCTION: &str = "Summarize this conversation in 4-5 sentences.\n\
Focus only on: program interest, location, schedule, tuition/aid, objections, and next steps. \
Ignore small talk.\n\nConversation:\n";

/// Extra schedule and objection words that make an older sentence worth keeping.
const DIGEST_KEYWORDS: &[&str] = &[
    "schedule", "start", "starts", "evening", "weekend", "morning", "full time",
    "part time", "hours", "campus", "location", "aid", "worried", "expensive",
    "horario", "tarde", "noche", "fin de semana",
];

/// Where the leading summary message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    /// History fit in the window; no leading message.
    None,
    Summarizer,
    LocalFallback,
}

/// The bounded message list handed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompactedHistory {
    pub messages: Vec<Turn>,
    pub summary_source: SummarySource,
    /// How many older turns the leading message stands in for.
    pub summarized_turns: usize,
}

#[derive(Debug, Clone)]
pub struct HistoryCompactor {
    window_size: usize,
    use_summarizer: bool,
    summarizer_timeout: Duration,
    fallback_char_budget: usize,
}

impl HistoryCompactor {
    pub fn new(
        window_size: usize,
        use_summarizer: bool,
        summarizer_timeout: Duration,
        fallback_char_budget: usize,
    ) -> Self {
        Self {
            window_size,
            use_summarizer,
            summarizer_timeout,
            fallback_char_budget,
        }
    }

    pub fn from_config(config: &EnrollConfig) -> Self {
        Self::new(
            config.window_size,
            config.use_summarizer,
            Duration::from_millis(config.summarizer_timeout_ms),
            config.fallback_char_budget,
        )
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Compact `history` and append `query` as the final user message.
    ///
    /// Never fails: summarizer errors degrade to the local digest.
    pub async fn compact(
        &self,
        history: &[Turn],
        query: &str,
        summarizer: &dyn Summarizer,
    ) -> CompactedHistory {
        let split = history.len().saturating_sub(self.window_size);
        let (older, recent) = history.split_at(split);
        let older: Vec<&Turn> = older.iter().filter(|t| !t.is_blank()).collect();

        let mut messages = Vec::with_capacity(self.window_size + 2);
        let mut summary_source = SummarySource::None;

        if !older.is_empty() {
            let (text, source) = self.summarize_older(&older, summarizer).await;
            messages.push(Turn::user(text));
            summary_source = source;
        }

        messages.extend(recent.iter().filter(|t| !t.is_blank()).cloned());

        if !query.trim().is_empty() {
            messages.push(Turn::user(query.trim()));
        }

        debug!(
            input_turns = history.len(),
            output_messages = messages.len(),
            summary = ?summary_source,
            "History compacted"
        );

        CompactedHistory {
            messages,
            summary_source,
            summarized_turns: older.len(),
        }
    }

    async fn summarize_older(
        &self,
        older: &[&Turn],
        summarizer: &dyn Summarizer,
    ) -> (String, SummarySource) {
        if self.use_summarizer {
            let prompt = format!("{SUMMARY_INSTRUCTION}{}", transcript(older));
            let result = bounded(
                summarizer.name(),
                self.summarizer_timeout,
                summarizer.summarize(&prompt),
            )
            .await
            .and_then(|text| {
                let text = text.trim().to_string();
                if text.is_empty() {
                    Err(CollaboratorError::EmptyResult {
                        collaborator: summarizer.name().to_string(),
                    })
                } else {
                    Ok(text)
                }
            });

            match result {
                Ok(summary) => {
                    return (
                        format!("Earlier conversation summary: {summary}"),
                        SummarySource::Summarizer,
                    );
                }
                Err(e) => {
                    warn!(summarizer = summarizer.name(), error = %e, "Summarization failed, using local digest");
                }
            }
        }

        (
            format!("Earlier conversation:\n{}", self.local_digest(older)),
            SummarySource::LocalFallback,
        )
    }

    /// Enrollment-relevant sentences from `older`, role-prefixed and cut to
    /// the character budget. All sentences are used when none are relevant.
    pub fn local_digest(&self, older: &[&Turn]) -> String {
        let mut relevant = Vec::new();
        let mut all = Vec::new();

        for turn in older {
            for sentence in sentences(&turn.text) {
                let line = format!("{}: {sentence}", turn.role);
                if is_relevant(sentence) {
                    relevant.push(line.clone());
                }
                all.push(line);
            }
        }

        let chosen = if relevant.is_empty() { all } else { relevant };
        truncate_chars(&chosen.join(" "), self.fallback_char_budget)
    }
}

fn transcript(turns: &[&Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role, t.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn is_relevant(sentence: &str) -> bool {
    let text = NormalizedText::new(sentence);
    [
        PROGRAM_CATEGORIES,
        PRICING_KEYWORDS,
        PAYMENT_KEYWORDS,
        ENROLLMENT_INTENT,
        NEW_YORK_LOCATIONS,
        NEW_JERSEY_LOCATIONS,
        DIGEST_KEYWORDS,
    ]
    .iter()
    .any(|list| text.contains_any(list))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

impl std::fmt::Display for SummarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Summarizer => "summarizer",
            Self::LocalFallback => "local_fallback",
        })
    }
}
