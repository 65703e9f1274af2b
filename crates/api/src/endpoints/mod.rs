//! API endpoints.

#![allow(missing_docs)]

mod clients;
mod metrics;
mod streams;

use axum::Router;
use stream_registry_db::models::ClientKind;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(streams::router())
        .merge(clients::router(ClientKind::Producer))
        .merge(clients::router(ClientKind::Consumer))
        .merge(metrics::router())
}
