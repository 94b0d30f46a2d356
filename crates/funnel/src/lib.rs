//! # Enrollwise Funnel
//!
//! Rule-based detection over a conversation: where it stands in the
//! enrollment funnel, which language to reply in, and which contact
//! details the student already gave. Everything here is a pure,
//! synchronous function of `(history, query)`.

pub mod contact;
pub mod language;
pub mod lexicon;
pub mod signals;
pub mod stage;

pub use contact::ContactInfoExtractor;
pub use language::{LanguageDetector, LanguageScores};
pub use signals::{ConversationSignals, SignalDetector};
pub use stage::{StageClassifier, strip_topic_tag};
