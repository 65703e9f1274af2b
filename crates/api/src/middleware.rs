//! API middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use stream_registry_common::{Timer, get_metrics};
use stream_registry_core::{StreamClientService, StreamService};
use stream_registry_db::Stores;
use stream_registry_db::models::ClientKind;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Stream operations.
    pub stream_service: StreamService,
    /// Store handles shared by every request.
    pub stores: Stores,
}

impl AppState {
    /// Build the state over a set of stores.
    #[must_use]
    pub fn new(stores: Stores) -> Self {
        Self {
            stream_service: StreamService::new(stores.streams.clone()),
            stores,
        }
    }

    /// A fresh client service for `kind`, bound to the shared stream store.
    #[must_use]
    pub fn client_service(&self, kind: ClientKind) -> StreamClientService {
        StreamClientService::new(self.stores.streams.clone(), self.stores.clients(kind), kind)
    }
}

/// Records every request into the HTTP counters.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let metrics = get_metrics();
    let timer = Timer::start();
    metrics.start_request();

    let response = next.run(req).await;

    metrics.end_request();
    metrics.record_http_request(response.status().as_u16(), timer.elapsed());
    response
}
