//! Producer and consumer endpoints beneath a stream.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use stream_registry_common::AppResult;
use stream_registry_core::EntriesPage;
use stream_registry_db::models::{ClientKind, StreamClient};

use crate::{
    extractors::{JsonBody, Paging},
    middleware::AppState,
    response::BareServerError,
};

/// List one page of the stream's clients.
async fn list_clients(
    State(state): State<AppState>,
    Extension(kind): Extension<ClientKind>,
    Path(stream_name): Path<String>,
    Paging(request): Paging,
) -> Result<Json<EntriesPage<StreamClient>>, BareServerError> {
    let page = state
        .client_service(kind)
        .list(&stream_name, request)
        .await?;
    Ok(Json(page))
}

/// Create or replace a client.
async fn upsert_client(
    State(state): State<AppState>,
    Extension(kind): Extension<ClientKind>,
    Path((stream_name, client_name)): Path<(String, String)>,
    JsonBody(client): JsonBody<StreamClient>,
) -> AppResult<StatusCode> {
    state
        .client_service(kind)
        .upsert(&stream_name, &client_name, client)
        .await?;
    Ok(StatusCode::ACCEPTED)
}

/// Fetch one client.
async fn get_client(
    State(state): State<AppState>,
    Extension(kind): Extension<ClientKind>,
    Path((stream_name, client_name)): Path<(String, String)>,
) -> AppResult<Json<StreamClient>> {
    let client = state
        .client_service(kind)
        .get(&stream_name, &client_name)
        .await?;
    Ok(Json(client))
}

/// Delete a client.
async fn delete_client(
    State(state): State<AppState>,
    Extension(kind): Extension<ClientKind>,
    Path((stream_name, client_name)): Path<(String, String)>,
) -> Result<StatusCode, BareServerError> {
    state
        .client_service(kind)
        .delete(&stream_name, &client_name)
        .await?;
    Ok(StatusCode::OK)
}

/// Create the router for one kind of client, e.g. `/v0/streams/{stream_name}/producers`.
pub fn router(kind: ClientKind) -> Router<AppState> {
    let base = format!("/v0/streams/{{stream_name}}/{}s", kind.as_str());

    Router::new()
        .route(&base, get(list_clients))
        .route(&format!("{base}/"), get(list_clients))
        .route(
            &format!("{base}/{{client_name}}"),
            get(get_client).put(upsert_client).delete(delete_client),
        )
        .layer(Extension(kind))
}
