//! The per-request entry point.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use enrollwise_config::{ConfigError, EnrollConfig};
use enrollwise_core::{
    ConversationStage, RawTurn, RetrievalRequest, Retriever, Summarizer, Turn, ingest_history,
    joined_text,
};
use enrollwise_funnel::{LanguageDetector, StageClassifier, strip_topic_tag};
use enrollwise_retrieval::{RetrievalFilter, fetch_passages};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::assembler::{AssembledContext, AssemblyInput, ContextAssembler};
use crate::compactor::HistoryCompactor;

/// How many trailing user turns feed program detection when the query is vague.
const RECENT_USER_TURNS: usize = 3;

/// Stateless request pipeline. Safe to share across tasks.
pub struct EnrollmentPipeline {
    config: EnrollConfig,
    classifier: StageClassifier,
    language: LanguageDetector,
    filter: RetrievalFilter,
    compactor: HistoryCompactor,
    assembler: ContextAssembler,
    summarizer: Arc<dyn Summarizer>,
    retriever: Arc<dyn Retriever>,
}

impl EnrollmentPipeline {
    /// Validate `config` and build every component from it.
    pub fn new(
        config: EnrollConfig,
        summarizer: Arc<dyn Summarizer>,
        retriever: Arc<dyn Retriever>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            classifier: StageClassifier::from_config(&config)?,
            language: LanguageDetector::new(config.spanish_min_score),
            filter: RetrievalFilter::from_config(&config)?,
            compactor: HistoryCompactor::from_config(&config),
            assembler: ContextAssembler::new(config.schedule_preview_limit),
            config,
            summarizer,
            retriever,
        })
    }

    pub fn config(&self) -> &EnrollConfig {
        &self.config
    }

    /// Stage only; no collaborator calls.
    pub fn classify(&self, history: &[Turn], query: &str) -> ConversationStage {
        self.classifier.classify(history, query)
    }

    /// Assemble context using the configured (or local) date.
    pub async fn assemble_context(&self, history: &[Turn], query: &str) -> AssembledContext {
        self.assemble_context_on(history, query, self.config.effective_today())
            .await
    }

    /// Validate loosely-shaped history entries, then assemble.
    pub async fn assemble_raw(&self, raw: &[RawTurn], query: &str) -> AssembledContext {
        let history = ingest_history(raw, self.config.max_history_turns);
        self.assemble_context(&history, query).await
    }

    /// Assemble context as of `today`. Always returns a context.
    pub async fn assemble_context_on(
        &self,
        history: &[Turn],
        query: &str,
        today: NaiveDate,
    ) -> AssembledContext {
        let request_id = Uuid::new_v4();
        let span = info_span!("assemble_context", %request_id, turns = history.len());

        self.run(request_id, history, query, today)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        request_id: Uuid,
        history: &[Turn],
        query: &str,
        today: NaiveDate,
    ) -> AssembledContext {
        let query = strip_topic_tag(query);

        let signals = self.classifier.detector().detect(history, query);
        let stage = StageClassifier::decide(&signals);
        let language = self.language.detect(query, history);

        let recent_users: Vec<&Turn> = history.iter().filter(|t| t.is_user()).collect();
        let recent_user_text =
            joined_text(recent_users.iter().rev().take(RECENT_USER_TURNS).rev().copied());
        let scope = self.filter.scope(query, stage, &recent_user_text);

        let request = RetrievalRequest {
            query: query.to_string(),
            top_k: self.config.top_k,
            campus_hint: scope.campus_hint(),
        };
        let raw_passages = fetch_passages(
            self.retriever.as_ref(),
            &request,
            Duration::from_millis(self.config.retriever_timeout_ms),
        )
        .await;
        let passages = self.filter.filter(&raw_passages, query, &scope, today);

        let compacted = self
            .compactor
            .compact(history, query, self.summarizer.as_ref())
            .await;

        info!(
            stage = %stage,
            ?language,
            programs = ?scope.programs,
            retrieved = raw_passages.len(),
            kept = passages.len(),
            messages = compacted.messages.len(),
            "Context assembled"
        );

        self.assembler.assemble(AssemblyInput {
            request_id,
            stage,
            language,
            location_confirmed: signals.location_confirmed,
            confirmed_campus: signals.confirmed_campus,
            contact: signals.contact,
            compacted,
            passages,
            today,
            catalog: &self.config.catalog,
        })
    }
}
