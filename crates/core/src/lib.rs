//! # Enrollwise Core
//!
//! Domain types, collaborator traits, and error definitions for the
//! Enrollwise conversation-state and context-assembly pipeline.
//! Every other crate in the workspace depends inward on this one.
//!
//! ## Design Philosophy
//!
//! - Input history is validated once at the boundary ([`message::Turn::from_raw`])
//!   and never mutated afterwards.
//! - The two external systems the pipeline needs (summarizer, retriever)
//!   are traits here, so tests and the CLI can plug in stubs.
//! - Collaborator failure is a value ([`CollaboratorError`]), not a panic path.

pub mod collaborator;
pub mod contact;
pub mod error;
pub mod message;
pub mod passage;
pub mod stage;
pub mod text;

// Re-export key types at crate root for ergonomics
pub use collaborator::{
    NoopSummarizer, RetrievalRequest, Retriever, StaticRetriever, Summarizer, bounded,
};
pub use contact::{ContactInfo, ContactRequirement};
pub use error::CollaboratorError;
pub use message::{RawTurn, Role, Turn, ingest_history, joined_text};
pub use passage::{Campus, Passage};
pub use stage::{ConversationStage, Language};
pub use text::{NormalizedText, normalize};
