//! Candidate records and the snapshot store they live in

pub mod record;
pub mod store;

pub use record::CandidateRecord;
pub use store::EntityStore;
