//! The summarization pipeline: chunking, map-reduce inference and the
//! rule-based fallback.

pub mod chunker;
pub mod controller;
pub mod format;
pub mod heuristic;

pub use controller::Summarizer;
pub use format::format_for_channel;
