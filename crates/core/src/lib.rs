//! Request handling for the stream registry.

pub mod pagination;
pub mod services;

pub use pagination::{EntriesPage, PageRequest};
pub use services::*;
