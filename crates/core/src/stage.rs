//! Funnel stage and reply language.

use serde::{Deserialize, Serialize};

/// Where a conversation stands in the enrollment funnel.
///
/// Exactly one stage is computed per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    Initial,
    Interested,
    Pricing,
    PaymentOptions,
    EnrollmentCollection,
    EnrollmentReady,
    PostEnrollment,
    Completion,
}

impl ConversationStage {
    /// Every stage, in funnel order.
    pub const ALL: [ConversationStage; 8] = [
        Self::Initial,
        Self::Interested,
        Self::Pricing,
        Self::PaymentOptions,
        Self::EnrollmentCollection,
        Self::EnrollmentReady,
        Self::PostEnrollment,
        Self::Completion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Interested => "interested",
            Self::Pricing => "pricing",
            Self::PaymentOptions => "payment_options",
            Self::EnrollmentCollection => "enrollment_collection",
            Self::EnrollmentReady => "enrollment_ready",
            Self::PostEnrollment => "post_enrollment",
            Self::Completion => "completion",
        }
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reply language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Spanish => "spanish",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_match_serde() {
        for stage in ConversationStage::ALL {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
    }

    #[test]
    fn language_defaults_to_english() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::Spanish.to_string(), "spanish");
    }
}
