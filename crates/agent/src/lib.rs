//! # Enrollwise Agent
//!
//! Turns a conversation into the payload for one generation call:
//! classify, retrieve, filter, compact, assemble.

pub mod assembler;
pub mod compactor;
pub mod pipeline;
pub mod policy;

pub use assembler::{AssembledContext, AssemblyInput, ContextAssembler};
pub use compactor::{CompactedHistory, HistoryCompactor, SummarySource};
pub use pipeline::EnrollmentPipeline;
