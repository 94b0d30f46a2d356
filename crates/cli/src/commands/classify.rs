//! `enrollwise classify`: stage, language, and signals for a conversation.

use std::path::Path;

use enrollwise_funnel::{LanguageDetector, StageClassifier, strip_topic_tag};

use crate::input::{load_config, load_history};

pub async fn run(
    config_path: Option<&Path>,
    query: &str,
    history_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let history = load_history(history_path, config.max_history_turns)?;

    let classifier = StageClassifier::from_config(&config)?;
    let detector = LanguageDetector::new(config.spanish_min_score);
    let query = strip_topic_tag(query);

    let signals = classifier.detector().detect(&history, query);
    let stage = StageClassifier::decide(&signals);
    let scores = detector.score(query, &history);

    let report = serde_json::json!({
        "stage": stage,
        "language": detector.detect(query, &history),
        "language_scores": scores,
        "signals": signals,
        "turns": history.len(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
