//! Shortlist Bridge - voice commands to browser-extension shortlist actions

pub mod api;
pub mod bridge;
pub mod candidates;
pub mod command;
pub mod core;
pub mod llm;
