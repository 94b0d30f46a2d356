//! `enrollwise assemble`: build the payload a generation call would receive.
//!
//! Runs offline: the summarizer is unavailable (local digest is used) and
//! the retriever serves the passages file.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use enrollwise_agent::EnrollmentPipeline;
use enrollwise_core::{NoopSummarizer, StaticRetriever};
use tracing::info;

use crate::input::{load_config, load_history, load_passages};

pub async fn run(
    config_path: Option<&Path>,
    query: &str,
    history_path: Option<&Path>,
    passages_path: Option<&Path>,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if today.is_some() {
        config.today = today;
    }
    let history = load_history(history_path, config.max_history_turns)?;
    let passages = load_passages(passages_path)?;

    let pipeline = EnrollmentPipeline::new(
        config,
        Arc::new(NoopSummarizer),
        Arc::new(StaticRetriever::new(passages)),
    )?;
    let context = pipeline.assemble_context(&history, query).await;
    info!(
        request_id = %context.request_id,
        stage = %context.stage,
        passages = context.filtered_passages.len(),
        "Context assembled"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&context)?);
        return Ok(());
    }

    println!("Request:   {}", context.request_id);
    println!("Stage:     {}", context.stage);
    println!("Language:  {:?}", context.language);
    println!("Location:  {}", if context.location_confirmed { "confirmed" } else { "not confirmed" });
    println!("Summary:   {}", context.summary_source);
    println!("Passages:  {}", context.filtered_passages.len());
    for fp in &context.filtered_passages {
        println!(
            "   #{} score={} {}",
            fp.rank,
            fp.score,
            fp.folder.as_deref().unwrap_or(&fp.passage.source_label)
        );
    }
    println!();
    println!("── System prompt ──────────────────────────────");
    println!("{}", context.system_prompt());
    println!();
    println!("── Messages ───────────────────────────────────");
    for turn in context.messages() {
        println!("[{}] {}", turn.role, turn.text);
    }
    Ok(())
}
