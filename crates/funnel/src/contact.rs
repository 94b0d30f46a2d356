//! Contact details the user already volunteered.
//!
//! Only user turns are scanned, so the school's own phone number or e-mail
//! in an assistant reply is never mistaken for the student's. A ten-digit run
//! inside a street address can still be read as a phone number; that false
//! positive is accepted.

use std::sync::LazyLock;

use enrollwise_core::{ContactInfo, NormalizedText, Turn};
use regex_lite::Regex;

use crate::lexicon::NAME_FILLER;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern is valid")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\(\d{3}\)\s?|\b\d{3}[-.]?)\d{3}[-.]?\d{4}\b").expect("phone pattern is valid")
});

/// Recovers [`ContactInfo`] from conversation history.
#[derive(Debug, Clone)]
pub struct ContactInfoExtractor {
    name_scan_max_words: usize,
}

impl Default for ContactInfoExtractor {
    fn default() -> Self {
        Self::new(8)
    }
}

impl ContactInfoExtractor {
    /// `name_scan_max_words`: user turns longer than this are never scanned
    /// for a name.
    pub fn new(name_scan_max_words: usize) -> Self {
        Self { name_scan_max_words }
    }

    /// Extract every field that can be found. Missing fields stay `None`.
    pub fn extract(&self, history: &[Turn]) -> ContactInfo {
        let user_text = history
            .iter()
            .filter(|t| t.is_user())
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let email = first_email(&user_text);
        let phone = first_phone(&user_text);
        let (first_name, last_name) = self.extract_name(history);

        ContactInfo {
            first_name,
            last_name,
            email,
            phone,
        }
    }

    /// Names come from the first short user turn that carries an `@`.
    fn extract_name(&self, history: &[Turn]) -> (Option<String>, Option<String>) {
        for turn in history.iter().filter(|t| t.is_user()) {
            if !turn.text.contains('@') || turn.text.split_whitespace().count() > self.name_scan_max_words {
                continue;
            }

            let mut names = name_tokens(&turn.text).into_iter();
            if let Some(first) = names.next() {
                return (Some(first), names.next());
            }
        }
        (None, None)
    }
}

/// First e-mail address in `text`.
pub fn first_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First ten-digit phone number in `text`.
pub fn first_phone(text: &str) -> Option<String> {
    PHONE.find(text).map(|m| m.as_str().to_string())
}

/// Alphabetic tokens of a contact message that can be names, in order.
fn name_tokens(text: &str) -> Vec<String> {
    let stripped = PHONE.replace_all(&EMAIL.replace_all(text, " "), " ").into_owned();

    stripped
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '/' | '|'))
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
        .filter(|word| {
            let normalized = NormalizedText::new(word);
            !NAME_FILLER.iter().any(|f| normalized.as_str() == *f)
        })
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
