//! Business logic services.

pub mod stream;
pub mod stream_client;

pub use stream::StreamService;
pub use stream_client::StreamClientService;

use stream_registry_common::{AppError, AppResult};

/// Check a stream or client name against the registry naming rule.
fn check_name(what: &str, name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::BadRequest(format!("{what} name is required")));
    }
    if name.len() > 255 {
        return Err(AppError::BadRequest(format!(
            "{what} name must be at most 255 characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(AppError::BadRequest(format!(
            "{what} name must contain only alphanumeric characters, dots, hyphens, and underscores"
        )));
    }
    Ok(())
}
