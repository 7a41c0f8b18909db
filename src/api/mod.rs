//! HTTP API: summary endpoints and the Slack slash-command webhook

pub mod error;
pub mod handler;
pub mod router;
pub mod signature;
pub mod slash_handler;

// Re-export the router for convenience
pub use router::router;
