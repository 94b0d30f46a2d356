//! # Enrollwise Retrieval
//!
//! Turns the retriever's raw ranked passages into the few that are safe to
//! show: taught at the right campus, not advertising dates that already
//! passed, and related to the question.

pub mod dates;
pub mod fetch;
pub mod filter;
pub mod programs;
pub mod relevance;

pub use fetch::fetch_passages;
pub use filter::{FilteredPassage, RetrievalFilter, folder_from_label};
pub use programs::{ProgramScope, detect_programs};
pub use relevance::RelevanceScorer;
