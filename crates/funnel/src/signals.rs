//! Independent conversation signal detectors.
//!
//! Each predicate is a pure function over the history and/or the current
//! query. [`SignalDetector`] runs them all once per request and hands the
//! resulting [`ConversationSignals`] to the stage classifier.

use enrollwise_config::{ConfigError, EnrollConfig, ProgramCampusMap};
use enrollwise_core::{Campus, ContactInfo, ContactRequirement, NormalizedText, Turn};
use serde::Serialize;

use crate::contact::ContactInfoExtractor;
use crate::lexicon::{
    COMPLETION_SIGNALS, ENROLLMENT_INTENT, ENROLLMENT_SHARED, GENERIC_INTEREST,
    NEW_JERSEY_LOCATIONS, NEW_YORK_LOCATIONS, PAYMENT_KEYWORDS, PRICING_KEYWORDS,
    PROGRAM_CATEGORIES,
};

fn any_turn(history: &[Turn], phrases: &[&str]) -> bool {
    history
        .iter()
        .any(|turn| NormalizedText::new(&turn.text).contains_any(phrases))
}

/// A campus name, street address, or synonym appears anywhere in history.
pub fn location_confirmed(history: &[Turn]) -> bool {
    any_turn(history, NEW_YORK_LOCATIONS) || any_turn(history, NEW_JERSEY_LOCATIONS)
}

/// The campus named by the most recent turn that names exactly one.
pub fn confirmed_campus(history: &[Turn]) -> Option<Campus> {
    history.iter().rev().find_map(|turn| {
        let text = NormalizedText::new(&turn.text);
        match (
            text.contains_any(NEW_YORK_LOCATIONS),
            text.contains_any(NEW_JERSEY_LOCATIONS),
        ) {
            (true, false) => Some(Campus::NewYork),
            (false, true) => Some(Campus::NewJersey),
            _ => None,
        }
    })
}

pub fn pricing_inquiry(query: &str) -> bool {
    NormalizedText::new(query).contains_any(PRICING_KEYWORDS)
}

pub fn payment_inquiry(query: &str) -> bool {
    NormalizedText::new(query).contains_any(PAYMENT_KEYWORDS)
}

/// The current query closes the conversation ("nope", "sounds good", ...).
pub fn completion_signal(query: &str) -> bool {
    NormalizedText::new(query).contains_any(COMPLETION_SIGNALS)
}

/// Some turn already handed the student off to enrollment staff.
pub fn enrollment_shared(history: &[Turn]) -> bool {
    any_turn(history, ENROLLMENT_SHARED)
}

/// A program category keyword or a catalog program key occurs in `text`.
pub fn mentions_program(text: &str, programs: &ProgramCampusMap) -> bool {
    let text = NormalizedText::new(text);
    text.contains_any(PROGRAM_CATEGORIES)
        || programs
            .keys_longest_first()
            .iter()
            .any(|key| text.contains_phrase(key))
}

/// Like [`mentions_program`] but generic words ("course", "classes") count too.
pub fn mentions_interest(text: &str, programs: &ProgramCampusMap) -> bool {
    mentions_program(text, programs) || NormalizedText::new(text).contains_any(GENERIC_INTEREST)
}

/// An intent phrase in the query or a user turn, plus a program mention
/// somewhere in history.
pub fn enrollment_ready(history: &[Turn], query: &str, programs: &ProgramCampusMap) -> bool {
    let intent = NormalizedText::new(query).contains_any(ENROLLMENT_INTENT)
        || history
            .iter()
            .filter(|t| t.is_user())
            .any(|t| NormalizedText::new(&t.text).contains_any(ENROLLMENT_INTENT));

    intent && history.iter().any(|t| mentions_program(&t.text, programs))
}

pub fn has_contact_info(contact: &ContactInfo, requirement: ContactRequirement) -> bool {
    contact.satisfies(requirement)
}

/// Every signal the stage decision table looks at, computed once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationSignals {
    pub contact: ContactInfo,
    pub has_contact_info: bool,
    pub completion_signal: bool,
    pub enrollment_shared: bool,
    pub enrollment_ready: bool,
    pub pricing_inquiry: bool,
    pub payment_inquiry: bool,
    pub program_interest: bool,
    pub location_confirmed: bool,
    pub confirmed_campus: Option<Campus>,
}

/// Runs every detector over one request.
#[derive(Debug, Clone)]
pub struct SignalDetector {
    programs: ProgramCampusMap,
    contact_requirement: ContactRequirement,
    extractor: ContactInfoExtractor,
}

impl SignalDetector {
    pub fn new(
        programs: ProgramCampusMap,
        contact_requirement: ContactRequirement,
        extractor: ContactInfoExtractor,
    ) -> Self {
        Self {
            programs,
            contact_requirement,
            extractor,
        }
    }

    pub fn from_config(config: &EnrollConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.catalog.program_map()?,
            config.contact_requirement,
            ContactInfoExtractor::new(config.name_scan_max_words),
        ))
    }

    pub fn programs(&self) -> &ProgramCampusMap {
        &self.programs
    }

    /// `query` should already be trimmed and free of a topic tag.
    pub fn detect(&self, history: &[Turn], query: &str) -> ConversationSignals {
        let contact = self.extractor.extract(history);
        let has_contact_info = has_contact_info(&contact, self.contact_requirement);

        ConversationSignals {
            has_contact_info,
            completion_signal: completion_signal(query),
            enrollment_shared: enrollment_shared(history),
            enrollment_ready: enrollment_ready(history, query, &self.programs),
            pricing_inquiry: pricing_inquiry(query),
            payment_inquiry: payment_inquiry(query),
            program_interest: mentions_interest(query, &self.programs)
                || history.iter().any(|t| mentions_interest(&t.text, &self.programs)),
            location_confirmed: location_confirmed(history),
            confirmed_campus: confirmed_campus(history),
            contact,
        }
    }
}
