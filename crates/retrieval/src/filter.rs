//! Campus-aware filtering of retrieved passages.

use chrono::NaiveDate;
use enrollwise_config::{ConfigError, EnrollConfig, ProgramCampusMap};
use enrollwise_core::{ConversationStage, Passage};
use serde::Serialize;
use tracing::debug;

use crate::dates::strip_stale_lines;
use crate::programs::{ProgramScope, detect_programs};
use crate::relevance::RelevanceScorer;

/// A retrieved passage that survived filtering.
///
/// `rank` is the passage's index in the retriever output and `source_label`
/// is untouched, so every filtered passage can be traced to its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredPassage {
    pub rank: usize,
    pub passage: Passage,
    pub score: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    pub stale_lines_removed: usize,
}

/// Folder-style display label for `gs://bucket/dir/file` sources.
///
/// A bare `gs://bucket` names no object, so it has no folder.
pub fn folder_from_label(label: &str) -> Option<String> {
    let path = label.strip_prefix("gs://")?;
    let (bucket, rest) = path.split_once('/')?;
    if bucket.is_empty() {
        return None;
    }
    match rest.rsplit_once('/') {
        Some((dir, _)) => Some(format!("gs://{bucket}/{dir}")),
        None => Some(format!("gs://{bucket}")),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Discards wrong-campus, stale, and irrelevant passages.
#[derive(Debug, Clone)]
pub struct RetrievalFilter {
    programs: ProgramCampusMap,
    max_passages: usize,
    max_passage_chars: usize,
    strip_stale_dates: bool,
}

impl RetrievalFilter {
    pub fn new(
        programs: ProgramCampusMap,
        max_passages: usize,
        max_passage_chars: usize,
        strip_stale_dates: bool,
    ) -> Self {
        Self {
            programs,
            max_passages,
            max_passage_chars,
            strip_stale_dates,
        }
    }

    pub fn from_config(config: &EnrollConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.catalog.program_map()?,
            config.max_passages,
            config.max_passage_chars,
            config.strip_stale_dates,
        ))
    }

    /// Decide which programs the request is about.
    ///
    /// The query wins. When it names no program and the conversation is past
    /// its opening, the recent user text is scanned instead.
    pub fn scope(&self, query: &str, stage: ConversationStage, recent_user_text: &str) -> ProgramScope {
        let mut detected = detect_programs(query, &self.programs);
        if detected.is_empty() && stage != ConversationStage::Initial {
            detected = detect_programs(recent_user_text, &self.programs);
        }
        ProgramScope::resolve(detected, &self.programs)
    }

    /// Filter `passages` (in retriever rank order) for `query`.
    pub fn filter(
        &self,
        passages: &[Passage],
        query: &str,
        scope: &ProgramScope,
        today: NaiveDate,
    ) -> Vec<FilteredPassage> {
        let scorer = RelevanceScorer::new(query, &self.programs);
        let mut kept = Vec::new();

        for (rank, passage) in passages.iter().enumerate() {
            if kept.len() >= self.max_passages {
                break;
            }

            let campus = passage.effective_campus();
            if !scope.allows(campus) {
                debug!(rank, source = %passage.source_label, %campus, "Dropping wrong-campus passage");
                continue;
            }

            let (text, stale_lines_removed) = if self.strip_stale_dates {
                strip_stale_lines(&passage.text, today)
            } else {
                (passage.text.clone(), 0)
            };
            if text.trim().is_empty() {
                debug!(rank, source = %passage.source_label, "Dropping passage with only stale lines");
                continue;
            }

            let score = scorer.score(&text);
            if score == 0 {
                continue;
            }

            kept.push(FilteredPassage {
                rank,
                passage: Passage {
                    text: truncate_chars(&text, self.max_passage_chars),
                    source_label: passage.source_label.clone(),
                    campus: passage.campus,
                },
                score,
                folder: folder_from_label(&passage.source_label),
                stale_lines_removed,
            });
        }

        debug!(input = passages.len(), kept = kept.len(), "Passages filtered");
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enrollwise_config::SchoolCatalog;
    use enrollwise_core::Campus;

    fn filter() -> RetrievalFilter {
        RetrievalFilter::from_config(&EnrollConfig::default()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn run(passages: &[Passage], query: &str) -> Vec<FilteredPassage> {
        let f = filter();
        let scope = f.scope(query, ConversationStage::Interested, "");
        f.filter(passages, query, &scope, today())
    }

    #[test]
    fn new_jersey_program_drops_new_york_sources() {
        let passages = vec![Passage::new(
            "Barbering classes start in November.",
            "gs://bucket/new_york/catalog.txt",
        )];
        assert!(run(&passages, "barbering schedule").is_empty());
    }

    #[test]
    fn unknown_campus_only_passes_without_program() {
        let passages = vec![Passage::new("Barbering classes start in November.", "catalog.pdf")];
        assert!(run(&passages, "barbering schedule").is_empty());
        assert_eq!(run(&passages, "when do classes start").len(), 1);
    }

    #[test]
    fn explicit_campus_tag_overrides_label() {
        let passages = vec![
            Passage::new("Barbering program: 900 hours.", "catalog.pdf").with_campus(Campus::NewJersey),
        ];
        assert_eq!(run(&passages, "barbering hours").len(), 1);
    }

    #[test]
    fn stale_lines_removed_and_empty_passages_dropped() {
        let passages = vec![
            Passage::new("Nails 2025-09-23 evening", "gs://b/new_jersey/a.txt"),
            Passage::new("Nails program\nNails 2025-09-23\nNails 2025-12-01", "gs://b/new_jersey/b.txt"),
        ];
        let out = run(&passages, "nails dates");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rank, 1);
        assert_eq!(out[0].passage.text, "Nails program\nNails 2025-12-01");
        assert_eq!(out[0].stale_lines_removed, 1);
        assert_eq!(out[0].folder.as_deref(), Some("gs://b/new_jersey"));
    }

    #[test]
    fn output_is_rank_ordered_subset_capped() {
        let passages: Vec<Passage> = (0..6)
            .map(|i| Passage::new(format!("Esthetics program note {i}"), format!("gs://b/new_york/{i}.txt")))
            .collect();
        let out = run(&passages, "esthetics");
        assert_eq!(out.len(), 3);
        for (fp, expected_rank) in out.iter().zip([0, 1, 2]) {
            assert_eq!(fp.rank, expected_rank);
            assert_eq!(fp.passage.source_label, passages[fp.rank].source_label);
            assert!(passages[fp.rank].text.starts_with(&fp.passage.text));
        }
    }

    #[test]
    fn irrelevant_passages_are_dropped() {
        let passages = vec![Passage::new("Parking is available nearby.", "gs://b/new_york/p.txt")];
        assert!(run(&passages, "esthetics").is_empty());
        assert!(run(&[], "esthetics").is_empty());
    }

    #[test]
    fn long_passages_are_truncated_on_char_boundary() {
        let f = RetrievalFilter::new(SchoolCatalog::default().program_map().unwrap(), 3, 10, true);
        let passages = vec![Passage::new("Uñas program ñññññññññ", "gs://b/new_york/x.txt")];
        let scope = ProgramScope::default();
        let out = f.filter(&passages, "uñas", &scope, today());
        assert_eq!(out[0].passage.text.chars().count(), 10);
    }

    #[test]
    fn recent_user_text_used_when_query_is_vague() {
        let f = filter();
        let scope = f.scope("when does it start?", ConversationStage::Interested, "I want barbering");
        assert_eq!(scope.campus_hint(), Some(Campus::NewJersey));
        let scope = f.scope("when does it start?", ConversationStage::Initial, "I want barbering");
        assert!(scope.is_unrestricted());
    }

    #[test]
    fn folder_labels() {
        assert_eq!(
            folder_from_label("gs://bucket/new_york/catalog.txt").as_deref(),
            Some("gs://bucket/new_york")
        );
        assert_eq!(folder_from_label("gs://bucket/file.txt").as_deref(), Some("gs://bucket"));
        assert_eq!(folder_from_label("catalog.pdf"), None);
        assert_eq!(folder_from_label("gs://"), None);
        assert_eq!(folder_from_label("gs://bucket"), None);
        assert_eq!(folder_from_label("gs://bucket/").as_deref(), Some("gs://bucket"));
    }
}
