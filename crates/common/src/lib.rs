//! Common utilities and shared types for the stream registry.
//!
//! This crate provides foundational components used across all registry crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Metrics**: Request and stream-operation counters via [`Metrics`]
//!
//! # Example
//!
//! ```no_run
//! use stream_registry_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Listening on {}:{}", config.server.host, config.server.port);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorMessage};
pub use metrics::{Metrics, MetricsSnapshot, StreamOperation, Timer, get_metrics};
