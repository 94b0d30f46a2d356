//! Reply language selection.

use enrollwise_core::{Language, NormalizedText, Turn};
use serde::Serialize;

use crate::lexicon::{ENGLISH_WORDS, SPANISH_MARKS, SPANISH_WORDS};

/// Weighted keyword evidence for each language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LanguageScores {
    pub spanish: u32,
    pub english: u32,
}

/// Picks English or Spanish from the current query and the conversation so far.
///
/// The query counts double. Diacritics or inverted punctuation in the query
/// add two more points for Spanish. Spanish is chosen only when it strictly
/// outscores English and reaches `min_score`; everything else is English.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    min_score: u32,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(2)
    }
}

impl LanguageDetector {
    pub fn new(min_score: u32) -> Self {
        Self { min_score }
    }

    pub fn score(&self, query: &str, history: &[Turn]) -> LanguageScores {
        let q = NormalizedText::new(query);
        let mut scores = LanguageScores {
            spanish: 2 * q.count_hits(SPANISH_WORDS) as u32,
            english: 2 * q.count_hits(ENGLISH_WORDS) as u32,
        };
        if query.chars().any(|c| SPANISH_MARKS.contains(&c.to_lowercase().next().unwrap_or(c))) {
            scores.spanish += 2;
        }

        for turn in history {
            let text = NormalizedText::new(&turn.text);
            scores.spanish += text.count_hits(SPANISH_WORDS) as u32;
            scores.english += text.count_hits(ENGLISH_WORDS) as u32;
        }
        scores
    }

    pub fn detect(&self, query: &str, history: &[Turn]) -> Language {
        let scores = self.score(query, history);
        if scores.spanish > scores.english && scores.spanish >= self.min_score {
            Language::Spanish
        } else {
            Language::English
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(query: &str, history: &[Turn]) -> Language {
        LanguageDetector::default().detect(query, history)
    }

    #[test]
    fn spanish_query_with_accents() {
        assert_eq!(detect("¿Cuánto cuesta el curso de uñas?", &[]), Language::Spanish);
    }

    #[test]
    fn plain_english_query() {
        assert_eq!(detect("How much does the nails program cost?", &[]), Language::English);
    }

    #[test]
    fn empty_input_defaults_to_english() {
        assert_eq!(detect("", &[]), Language::English);
        assert_eq!(detect("   ", &[]), Language::English);
    }

    #[test]
    fn spanish_history_carries_short_reply() {
        let history = vec![
            Turn::user("Hola, quiero información sobre el programa de estética"),
            Turn::assistant("¡Claro! ¿En qué campus?"),
        ];
        assert_eq!(detect("ok", &history), Language::Spanish);
    }

    #[test]
    fn tie_goes_to_english() {
        let detector = LanguageDetector::default();
        let scores = detector.score("hola hello", &[]);
        assert_eq!(scores.spanish, scores.english);
        assert_eq!(detector.detect("hola hello", &[]), Language::English);
    }

    #[test]
    fn minimum_score_is_enforced() {
        let detector = LanguageDetector::new(5);
        assert_eq!(detector.detect("hola", &[]), Language::English);
        assert_eq!(LanguageDetector::new(2).detect("hola", &[]), Language::Spanish);
    }

    #[test]
    fn assistant_history_counts() {
        let history = vec![Turn::assistant(
            "Hola, gracias por escribir. ¿Cómo puedo ayudarle con el programa?",
        )];
        let detector = LanguageDetector::default();
        let scores = detector.score("ok", &history);
        assert_eq!(scores.spanish, 6);
        assert_eq!(scores.english, 0);
        assert_eq!(detector.detect("ok", &history), Language::Spanish);
    }
}
