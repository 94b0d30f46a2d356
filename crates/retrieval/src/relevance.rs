//! Keyword relevance scoring for retrieved passages.

use std::collections::BTreeSet;

use enrollwise_config::ProgramCampusMap;
use enrollwise_core::NormalizedText;

/// Words that never count as query terms.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "you", "your", "what", "when", "where", "which", "who",
    "how", "does", "did", "can", "could", "would", "should", "with", "about", "this",
    "that", "there", "have", "has", "any", "from", "want", "like", "tell", "more",
    "info", "please", "thanks", "que", "los", "las", "una", "para", "por", "con",
    "como", "cual", "del", "hay", "quiero", "sobre", "tiene", "tienen",
];

/// Terms that mark a passage as useful regardless of the query.
const RELEVANCE_KEYWORDS: &[&str] = &[
    "tuition", "price", "cost", "fee", "fees", "payment", "financial aid", "schedule",
    "start date", "starts", "class", "classes", "program", "course", "hours",
    "full time", "part time", "evening", "weekend", "enrollment", "campus", "license",
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december", "precio", "costo", "horario",
    "programa", "curso", "clases", "matricula", "inscripcion", "enero", "febrero",
    "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre", "octubre",
    "noviembre", "diciembre",
];

/// Counts distinct query terms and relevance keywords in passage text.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    terms: BTreeSet<String>,
}

impl RelevanceScorer {
    pub fn new(query: &str, programs: &ProgramCampusMap) -> Self {
        let mut terms: BTreeSet<String> = query_terms(query).into_iter().collect();
        terms.extend(RELEVANCE_KEYWORDS.iter().map(|k| k.to_string()));
        terms.extend(programs.keys_longest_first().iter().cloned());
        Self { terms }
    }

    pub fn score(&self, text: &str) -> usize {
        let text = NormalizedText::new(text);
        self.terms.iter().filter(|t| text.contains_phrase(t)).count()
    }
}

/// Normalized query words of three or more characters, minus stopwords.
pub fn query_terms(query: &str) -> Vec<String> {
    let normalized = NormalizedText::new(query);
    let mut seen = BTreeSet::new();
    normalized
        .tokens()
        .filter(|t| t.chars().count() >= 3 && !STOPWORDS.contains(t))
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use enrollwise_config::SchoolCatalog;

    #[test]
    fn query_terms_drop_short_words_and_stopwords() {
        assert_eq!(
            query_terms("What are the Nails hours in NY? nails"),
            vec!["nails".to_string(), "hours".to_string()]
        );
        assert!(query_terms("").is_empty());
    }

    #[test]
    fn scores_count_distinct_hits() {
        let programs = SchoolCatalog::default().program_map().unwrap();
        let scorer = RelevanceScorer::new("orientation day", &programs);
        assert_eq!(scorer.score("Orientation is on day one."), 2);
        assert_eq!(scorer.score("Parking is available nearby."), 0);
        assert!(scorer.score("Nails program starts in December") >= 3);
    }
}
