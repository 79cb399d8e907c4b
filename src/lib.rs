//! Lead Widget — chat widget client core with conversational lead capture.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod lead;
pub mod safety;
