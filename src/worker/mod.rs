//! Background processing of slash commands

pub mod deliver;
pub mod handler;
pub mod summarize;

pub use handler::process_command;
