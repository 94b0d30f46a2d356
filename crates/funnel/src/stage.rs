//! Funnel stage classification.
//!
//! The decision table in [`StageClassifier::decide`] is ordered and the first
//! matching row wins. Reordering rows changes which stage a conversation
//! lands in, so treat any change to the order as breaking.

use enrollwise_config::{ConfigError, EnrollConfig};
use enrollwise_core::{ConversationStage, Turn};
use tracing::debug;

use crate::signals::{ConversationSignals, SignalDetector};

/// Strip a leading `[TOPIC: ...]` tag and surrounding whitespace.
pub fn strip_topic_tag(query: &str) -> &str {
    let trimmed = query.trim();
    let is_tagged = trimmed
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("[topic:"));
    if !is_tagged {
        return trimmed;
    }
    match trimmed.find(']') {
        Some(end) => trimmed[end + 1..].trim(),
        None => trimmed,
    }
}

/// Maps a conversation to exactly one [`ConversationStage`].
#[derive(Debug, Clone)]
pub struct StageClassifier {
    detector: SignalDetector,
}

impl StageClassifier {
    pub fn new(detector: SignalDetector) -> Self {
        Self { detector }
    }

    pub fn from_config(config: &EnrollConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(SignalDetector::from_config(config)?))
    }

    pub fn detector(&self) -> &SignalDetector {
        &self.detector
    }

    /// Classify the conversation. Total: never fails.
    pub fn classify(&self, history: &[Turn], query: &str) -> ConversationStage {
        let signals = self.detector.detect(history, strip_topic_tag(query));
        Self::decide(&signals)
    }

    /// The decision table alone.
    pub fn decide(signals: &ConversationSignals) -> ConversationStage {
        use ConversationStage::*;

        let stage = if signals.has_contact_info
            && signals.completion_signal
            && signals.enrollment_shared
        {
            Completion
        } else if signals.has_contact_info && signals.enrollment_shared {
            PostEnrollment
        } else if signals.has_contact_info {
            EnrollmentReady
        } else if signals.enrollment_ready {
            // contact info is incomplete here, otherwise the row above matched
            EnrollmentCollection
        } else if signals.pricing_inquiry {
            Pricing
        } else if signals.payment_inquiry {
            PaymentOptions
        } else if signals.program_interest {
            Interested
        } else {
            Initial
        };

        debug!(stage = %stage, "Stage decided");
        stage
    }
}
