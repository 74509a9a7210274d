//! HTTP API: the browser extension and voice agent talk to the bridge here
//!
//! All responses are JSON, all routes are CORS-open and answer OPTIONS.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::build_router;
pub use server::serve;
