//! End-to-end integration tests for the Enrollwise context pipeline.
//!
//! These tests drive `EnrollmentPipeline` from raw history and a user query
//! to the assembled payload, with scripted collaborators standing in for the
//! summarizer and retrieval backends.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use enrollwise_agent::{EnrollmentPipeline, HistoryCompactor, SummarySource};
use enrollwise_config::{CourseStart, EnrollConfig, ProgramEntry, SchoolCatalog};
use enrollwise_core::{
    Campus, CollaboratorError, ConversationStage, Language, NoopSummarizer, Passage, RawTurn,
    RetrievalRequest, Retriever, StaticRetriever, Summarizer, Turn,
};
use enrollwise_funnel::{ContactInfoExtractor, StageClassifier};
use enrollwise_retrieval::{ProgramScope, RetrievalFilter};

// ── Scripted collaborators ───────────────────────────────────────────────

/// A summarizer that returns a fixed summary and counts calls.
struct ScriptedSummarizer {
    summary: String,
    calls: Mutex<usize>,
}

impl ScriptedSummarizer {
    fn new(summary: &str) -> Self {
        Self {
            summary: summary.into(),
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Summarizer for ScriptedSummarizer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn summarize(&self, _prompt: &str) -> Result<String, CollaboratorError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.summary.clone())
    }
}

/// A summarizer that always errors.
struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    fn name(&self) -> &str {
        "failing"
    }

    async fn summarize(&self, _prompt: &str) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::failed("failing", "quota exceeded"))
    }
}

/// A retriever that never answers in time.
struct HangingRetriever;

#[async_trait]
impl Retriever for HangingRetriever {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn retrieve(&self, _request: &RetrievalRequest) -> Result<Vec<Passage>, CollaboratorError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![])
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
}

fn config() -> EnrollConfig {
    EnrollConfig {
        today: Some(today()),
        ..Default::default()
    }
}

fn pipeline_with(
    summarizer: Arc<dyn Summarizer>,
    retriever: Arc<dyn Retriever>,
) -> EnrollmentPipeline {
    EnrollmentPipeline::new(config(), summarizer, retriever).unwrap()
}

fn pipeline() -> EnrollmentPipeline {
    pipeline_with(Arc::new(NoopSummarizer), Arc::new(StaticRetriever::default()))
}

fn chat(n: usize) -> Vec<Turn> {
    (0..n)
        .map(|i| match i % 2 {
            0 => Turn::user(format!("Message {i}: what about the esthetics evening schedule?")),
            _ => Turn::assistant(format!("Reply {i}: we have evening classes in New York.")),
        })
        .collect()
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[tokio::test]
async fn scenario_a_greeting() {
    let ctx = pipeline().assemble_context(&[], "Hello").await;
    assert_eq!(ctx.stage, ConversationStage::Initial);
    assert_eq!(ctx.language, Language::English);
    assert!(ctx.contact.is_empty());
    assert!(!ctx.location_confirmed);
    assert!(ctx.policy_text.contains("**INITIAL STAGE:**"));
}

#[tokio::test]
async fn scenario_b_completion() {
    let history = vec![
        Turn::user("I'm interested in nails at the Wayne campus"),
        Turn::assistant("Great! Please share your name, email, and phone."),
        Turn::user("ani@b.com 678-938-6850 Anisha B"),
        Turn::assistant("Thanks Anisha! Our enrollment advisor will reach out soon. Anything else?"),
    ];
    let ctx = pipeline().assemble_context(&history, "nope").await;

    assert_eq!(ctx.stage, ConversationStage::Completion);
    assert_eq!(ctx.contact.first_name.as_deref(), Some("Anisha"));
    assert_eq!(ctx.contact.email.as_deref(), Some("ani@b.com"));
    assert_eq!(ctx.contact.phone.as_deref(), Some("678-938-6850"));
    assert!(ctx.location_confirmed);
    assert!(ctx.policy_text.contains("Respond with EXACTLY this message"));
    assert!(ctx.policy_text.contains("- Name: Anisha B"));
}

#[tokio::test]
async fn scenario_c_pricing() {
    let ctx = pipeline()
        .assemble_context(&[], "how much does the nails program cost")
        .await;
    assert_eq!(ctx.stage, ConversationStage::Pricing);
    assert!(ctx.policy_text.contains("**PRICING STAGE:**"));
    assert!(ctx.policy_text.contains("**Tuition:**"));
}

#[tokio::test]
async fn scenario_d_campus_mismatch() {
    let retriever = StaticRetriever::new(vec![Passage::new(
        "Barbering schedule: classes start November 3, 2025.",
        "gs://bucket/new_york/catalog.txt",
    )]);
    let ctx = pipeline_with(Arc::new(NoopSummarizer), Arc::new(retriever))
        .assemble_context(&[], "barbering schedule")
        .await;
    assert!(ctx.filtered_passages.is_empty());
    assert!(!ctx.system_prompt().contains("Retrieved Context"));
}

#[tokio::test]
async fn scenario_e_long_history() {
    let summarizer = Arc::new(ScriptedSummarizer::new("Wants evening esthetics in NY."));
    let ctx = pipeline_with(summarizer.clone(), Arc::new(StaticRetriever::default()))
        .assemble_context(&chat(20), "Is there a spot left?")
        .await;

    assert_eq!(ctx.compacted_history.len(), 8);
    assert_eq!(ctx.summary_source, SummarySource::Summarizer);
    assert_eq!(summarizer.calls(), 1);
    assert_eq!(
        ctx.messages()[0].text,
        "Earlier conversation summary: Wants evening esthetics in NY."
    );
    assert_eq!(ctx.messages()[7], Turn::user("Is there a spot left?"));
}

// ── Properties ───────────────────────────────────────────────────────────

#[tokio::test]
async fn summarizer_failure_keeps_shape() {
    let history = chat(15);
    let ok = pipeline_with(
        Arc::new(ScriptedSummarizer::new("summary")),
        Arc::new(StaticRetriever::default()),
    )
    .assemble_context(&history, "ok")
    .await;
    let failed = pipeline_with(Arc::new(FailingSummarizer), Arc::new(StaticRetriever::default()))
        .assemble_context(&history, "ok")
        .await;

    assert_eq!(failed.summary_source, SummarySource::LocalFallback);
    assert_eq!(ok.messages().len(), failed.messages().len());
    assert_eq!(ok.messages()[1..], failed.messages()[1..]);
    assert_ne!(ok.messages()[0].text, failed.messages()[0].text);
}

#[tokio::test]
async fn compaction_bound_holds() {
    let compactor = HistoryCompactor::new(4, true, Duration::from_millis(50), 800);
    for n in [0, 3, 4, 5, 40, 120] {
        let out = compactor.compact(&chat(n), "next", &FailingSummarizer).await;
        assert!(out.messages.len() <= 6, "n={n} gave {}", out.messages.len());
        assert!(out.messages.iter().all(|t| !t.text.trim().is_empty()));
    }
}

#[tokio::test(start_paused = true)]
async fn hanging_retriever_times_out_to_no_context() {
    let ctx = pipeline_with(Arc::new(NoopSummarizer), Arc::new(HangingRetriever))
        .assemble_context(&[], "esthetics schedule")
        .await;
    assert!(ctx.filtered_passages.is_empty());
    assert_eq!(ctx.stage, ConversationStage::Interested);
}

#[test]
fn classification_is_total() {
    let classifier = StageClassifier::from_config(&config()).unwrap();
    let queries = [
        "", " ", "nope", "¿¡", "💅💅", "[TOPIC:", "[TOPIC: x] sign me up", "123-456-7890",
        "a@b.co", "precio de uñas", "\n\n\t",
    ];
    let histories = [vec![], chat(3), vec![Turn::user("x@y.io 555-555-5555 Jo Do")]];
    for history in &histories {
        for query in queries {
            let stage = classifier.classify(history, query);
            assert!(ConversationStage::ALL.contains(&stage));
        }
    }
}

#[test]
fn filter_output_is_a_subset() {
    let passages = vec![
        Passage::new("Esthetics 600 hours, evening schedule", "gs://b/new_york/a.txt"),
        Passage::new("Barbering schedule", "gs://b/new_jersey/b.txt"),
        Passage::new("Esthetics 2025-01-05 start\nEsthetics 2026-01-05 start", "gs://b/new_jersey/c.txt"),
        Passage::new("Parking info", "gs://b/new_york/d.txt"),
    ];
    let filter = RetrievalFilter::from_config(&config()).unwrap();
    let scope = filter.scope("esthetics schedule", ConversationStage::Interested, "");
    let out = filter.filter(&passages, "esthetics schedule", &scope, today());

    assert!(!out.is_empty());
    for fp in &out {
        let source = &passages[fp.rank];
        assert_eq!(fp.passage.source_label, source.source_label);
        assert!(fp.passage.text.lines().all(|l| source.text.lines().any(|s| s == l)));
    }
    assert!(out.windows(2).all(|w| w[0].rank < w[1].rank));
}

#[test]
fn new_jersey_program_removes_every_new_york_passage() {
    let passages: Vec<Passage> = ["new_york", "new_jersey", "nyc", "wayne", "misc"]
        .iter()
        .map(|dir| Passage::new("Barbering schedule details", format!("gs://b/{dir}/x.txt")))
        .collect();
    let filter = RetrievalFilter::from_config(&config()).unwrap();
    let scope = filter.scope("barbering", ConversationStage::Interested, "");
    let out = filter.filter(&passages, "barbering", &scope, today());

    assert!(out.iter().all(|fp| fp.passage.effective_campus() == Campus::NewJersey));
    assert_eq!(out.iter().map(|fp| fp.rank).collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn contact_extraction_is_monotone() {
    let extractor = ContactInfoExtractor::default();
    let mut history = vec![Turn::user("Jo Do jo@do.io 973-555-0101")];
    let before = extractor.extract(&history);
    history.push(Turn::user("my other email is jo.work@corp.com"));
    let after = extractor.extract(&history);

    assert_eq!(before.phone, after.phone);
    assert_eq!(before.first_name, after.first_name);
    assert_eq!(before.last_name, after.last_name);
    assert_eq!(extractor.extract(&history), after);
}

// ── Catalog & configuration ──────────────────────────────────────────────

#[tokio::test]
async fn spanish_conversation_with_schedule() {
    let mut config = config();
    config.catalog.schedule = vec![
        CourseStart {
            category: "Esthetics".into(),
            program: "Esthetics Part Time Spanish".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 4),
            weekday: Some("Monday".into()),
            language: Language::Spanish,
            campus: Some(Campus::NewYork),
        },
        CourseStart {
            category: "Waxing".into(),
            program: "Waxing".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
            end_date: None,
            weekday: None,
            language: Language::English,
            campus: Some(Campus::NewYork),
        },
    ];
    let pipeline = EnrollmentPipeline::new(
        config,
        Arc::new(NoopSummarizer),
        Arc::new(StaticRetriever::default()),
    )
    .unwrap();

    let history = vec![Turn::user("Hola, quiero información sobre estética")];
    let ctx = pipeline
        .assemble_context(&history, "¿Cuándo empiezan las clases?")
        .await;

    assert_eq!(ctx.language, Language::Spanish);
    assert_eq!(ctx.stage, ConversationStage::Interested);
    assert!(ctx.policy_text.contains("Esthetics Part Time Spanish"));
    assert!(!ctx.policy_text.contains("- Waxing (Waxing)"));
    assert!(ctx.policy_text.contains("¡Perfecto!"));
}

#[test]
fn conflicting_program_campuses_are_rejected() {
    let mut config = config();
    config.catalog = SchoolCatalog {
        programs: vec![
            ProgramEntry {
                name: "waxing".into(),
                aliases: vec![],
                hours: None,
                campuses: vec![Campus::NewYork],
            },
            ProgramEntry {
                name: "brows".into(),
                aliases: vec!["waxing".into()],
                hours: None,
                campuses: vec![Campus::NewJersey],
            },
        ],
        ..Default::default()
    };
    let result = EnrollmentPipeline::new(
        config,
        Arc::new(NoopSummarizer),
        Arc::new(StaticRetriever::default()),
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn raw_turns_from_json() {
    let raw: Vec<RawTurn> = serde_json::from_str(
        r#"[
            {"role": "user", "content": [{"text": "anisha b, ani@b.com, 678-9386850"}]},
            {"role": "tool", "content": "ignored"},
            {"role": "assistant", "content": [{"text": "Thank you. Our enrollment team will contact you."}]}
        ]"#,
    )
    .unwrap();
    let ctx = pipeline().assemble_raw(&raw, "yes that is correct").await;
    assert_eq!(ctx.stage, ConversationStage::Completion);
    assert_eq!(ctx.contact.full_name().as_deref(), Some("Anisha B"));
}

#[test]
fn campus_hint_for_single_campus_scope() {
    let filter = RetrievalFilter::from_config(&config()).unwrap();
    let scope: ProgramScope = filter.scope("makeup classes", ConversationStage::Initial, "");
    assert_eq!(scope.campus_hint(), Some(Campus::NewYork));
}
