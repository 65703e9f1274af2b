//! Stream endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use stream_registry_common::AppResult;
use stream_registry_core::EntriesPage;
use stream_registry_db::models::Stream;

use crate::{
    extractors::{JsonBody, Paging},
    middleware::AppState,
    response::BareServerError,
};

/// Create or replace a stream.
async fn upsert_stream(
    State(state): State<AppState>,
    Path(stream_name): Path<String>,
    JsonBody(stream): JsonBody<Stream>,
) -> AppResult<StatusCode> {
    state.stream_service.upsert(&stream_name, stream).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Fetch one stream.
async fn get_stream(
    State(state): State<AppState>,
    Path(stream_name): Path<String>,
) -> AppResult<Json<Stream>> {
    let stream = state.stream_service.get(&stream_name).await?;
    Ok(Json(stream))
}

/// List one page of streams.
async fn list_streams(
    State(state): State<AppState>,
    Paging(request): Paging,
) -> Result<Json<EntriesPage<Stream>>, BareServerError> {
    let page = state.stream_service.list(request).await?;
    Ok(Json(page))
}

/// Delete a stream.
async fn delete_stream(
    State(state): State<AppState>,
    Path(stream_name): Path<String>,
) -> Result<StatusCode, BareServerError> {
    state.stream_service.delete(&stream_name).await?;
    Ok(StatusCode::OK)
}

/// Create the streams router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v0/streams", get(list_streams))
        .route("/v0/streams/", get(list_streams))
        .route(
            "/v0/streams/{stream_name}",
            get(get_stream).put(upsert_stream).delete(delete_stream),
        )
}
