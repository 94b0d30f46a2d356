//! Context assembly, one [`AssembledContext`] per request.
//!
//! Pure composition of upstream results. The only lookups are the policy
//! blocks keyed by stage and language (see [`crate::policy`]).

use chrono::NaiveDate;
use enrollwise_config::SchoolCatalog;
use enrollwise_core::{Campus, ContactInfo, ConversationStage, Language, Turn};
use enrollwise_retrieval::FilteredPassage;
use serde::Serialize;
use uuid::Uuid;

use crate::compactor::{CompactedHistory, SummarySource};
use crate::policy::{self, PolicyInput};

/// Separator between retrieved passages in the system prompt.
pub const PASSAGE_SEPARATOR: &str = "\n\n---\n";

/// The payload handed to the text-generation collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct AssembledContext {
    pub request_id: Uuid,
    pub stage: ConversationStage,
    pub language: Language,
    pub contact: ContactInfo,
    pub location_confirmed: bool,
    pub compacted_history: Vec<Turn>,
    pub summary_source: SummarySource,
    pub filtered_passages: Vec<FilteredPassage>,
    pub policy_text: String,
}

impl AssembledContext {
    /// Passage texts joined for the prompt. Empty when nothing survived.
    pub fn retrieved_context(&self) -> String {
        self.filtered_passages
            .iter()
            .map(|p| p.passage.text.as_str())
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR)
    }

    /// Policy text followed by the retrieved context block, if any.
    pub fn system_prompt(&self) -> String {
        if self.filtered_passages.is_empty() {
            self.policy_text.clone()
        } else {
            format!(
                "{}\n\n**Retrieved Context:**\n{}",
                self.policy_text,
                self.retrieved_context()
            )
        }
    }

    pub fn messages(&self) -> &[Turn] {
        &self.compacted_history
    }
}

/// All inputs for a single assembly.
#[derive(Debug)]
pub struct AssemblyInput<'a> {
    pub request_id: Uuid,
    pub stage: ConversationStage,
    pub language: Language,
    pub contact: ContactInfo,
    pub location_confirmed: bool,
    pub confirmed_campus: Option<Campus>,
    pub compacted: CompactedHistory,
    pub passages: Vec<FilteredPassage>,
    pub today: NaiveDate,
    pub catalog: &'a SchoolCatalog,
}

/// Stateless. Create one and reuse it.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    schedule_preview_limit: usize,
}

impl ContextAssembler {
    pub fn new(schedule_preview_limit: usize) -> Self {
        Self {
            schedule_preview_limit,
        }
    }

    pub fn assemble(&self, input: AssemblyInput<'_>) -> AssembledContext {
        let policy_text = policy::render(&PolicyInput {
            stage: input.stage,
            language: input.language,
            contact: &input.contact,
            location_confirmed: input.location_confirmed,
            confirmed_campus: input.confirmed_campus,
            catalog: input.catalog,
            today: input.today,
            schedule_preview_limit: self.schedule_preview_limit,
        });

        AssembledContext {
            request_id: input.request_id,
            stage: input.stage,
            language: input.language,
            contact: input.contact,
            location_confirmed: input.location_confirmed,
            compacted_history: input.compacted.messages,
            summary_source: input.compacted.summary_source,
            filtered_passages: input.passages,
            policy_text,
        }
    }
}
