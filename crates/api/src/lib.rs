//! HTTP API layer for the stream registry.
//!
//! - **Endpoints**: `/v0/streams` with its producer and consumer
//!   sub-resources, plus metrics and health probes
//! - **Extractors**: paging parameters and JSON bodies with structured rejections
//! - **Middleware**: shared state and HTTP metrics
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, metrics_middleware};
