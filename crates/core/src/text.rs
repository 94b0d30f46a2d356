//! Word-boundary keyword matching over normalized text.
//!
//! Normalization lowercases, folds Spanish vowel accents (`á` → `a`, keeps
//! `ñ`), and turns every non-alphanumeric character into a single space.
//! Phrases are normalized the same way, so `"I'm good"` matches `"im good"`
//! only if both normalize identically, and `"no"` never matches inside
//! `"know"`.

/// Lowercase and fold accents of a single character.
fn fold(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
        'Ñ' => 'ñ',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Normalize text to space-separated lowercase tokens.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(fold(c));
        } else {
            pending_space = true;
        }
    }
    out
}

/// Text prepared for repeated phrase lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    padded: String,
}

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        Self {
            padded: format!(" {} ", normalize(text)),
        }
    }

    /// The normalized text without padding.
    pub fn as_str(&self) -> &str {
        self.padded.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Whether `phrase` occurs on word boundaries.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let needle = normalize(phrase);
        !needle.is_empty() && self.padded.contains(&format!(" {needle} "))
    }

    /// Whether any of `phrases` occurs.
    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.contains_phrase(p))
    }

    /// Number of distinct `phrases` that occur.
    pub fn count_hits(&self, phrases: &[&str]) -> usize {
        phrases.iter().filter(|p| self.contains_phrase(p)).count()
    }

    /// Remove every occurrence of `phrase`, returning whether any was found.
    pub fn consume_phrase(&mut self, phrase: &str) -> bool {
        let needle = normalize(phrase);
        if needle.is_empty() {
            return false;
        }
        let pattern = format!(" {needle} ");
        if !self.padded.contains(&pattern) {
            return false;
        }
        while self.padded.contains(&pattern) {
            self.padded = self.padded.replacen(&pattern, " ", 1);
        }
        true
    }

    /// Iterate over the tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.padded.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_and_splits() {
        assert_eq!(normalize("  ¿Cuánto CUESTA el curso?  "), "cuanto cuesta el curso");
        assert_eq!(normalize("Uñas, I'm good!"), "uñas i m good");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn phrases_match_on_word_boundaries() {
        let text = NormalizedText::new("I don't know, nope.");
        assert!(text.contains_phrase("nope"));
        assert!(text.contains_phrase("Don't know"));
        assert!(!text.contains_phrase("no"));
        assert!(!text.contains_phrase(""));
    }

    #[test]
    fn digits_are_tokens() {
        let text = NormalizedText::new("We are at 1501 Broadway, Suite 700");
        assert!(text.contains_phrase("1501 broadway"));
        assert_eq!(text.tokens().count(), 7);
    }

    #[test]
    fn consume_removes_every_occurrence() {
        let mut text = NormalizedText::new("nails and more nails");
        assert!(text.consume_phrase("nails"));
        assert!(!text.contains_phrase("nails"));
        assert!(text.contains_phrase("and more"));
        assert!(!text.consume_phrase("nails"));
    }

    #[test]
    fn count_hits_counts_distinct_phrases() {
        let text = NormalizedText::new("hola hola gracias");
        assert_eq!(text.count_hits(&["hola", "gracias", "adios"]), 2);
    }
}
