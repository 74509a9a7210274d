//! Language-model backend: HTTP client, prompt context and reply parsing

pub mod client;
pub mod context;
pub mod parser;

pub use client::{CompletionBackend, LlmClient};
pub use context::CandidateContext;
pub use parser::{request_translation, BackendReply};
