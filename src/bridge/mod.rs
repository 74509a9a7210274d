//! Application service tying the store, translator and queue together

pub mod dashboard;
pub mod notify;
pub mod service;

pub use dashboard::Dashboard;
pub use notify::{LogNotifier, VoiceContextNotifier};
pub use service::{Bridge, CandidateListing, UploadBatch, UploadReceipt, VoiceReceipt};
