//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::{Deserialize, de::DeserializeOwned};
use stream_registry_common::{AppError, AppResult};
use stream_registry_core::PageRequest;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageQuery {
    page_number: Option<String>,
    page_size: Option<String>,
}

/// Paging parameters from `?pageNumber=&pageSize=`.
///
/// Missing or empty values take the defaults. Anything else that is not a
/// non-negative integer, or a zero page size, is a bad request.
#[derive(Debug, Clone, Copy)]
pub struct Paging(pub PageRequest);

impl<S> FromRequestParts<S> for Paging
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let page_number = parse_param("pageNumber", raw.page_number.as_deref())?;
        let page_size = parse_param("pageSize", raw.page_size.as_deref())?;

        PageRequest::new(page_number, page_size).map(Self)
    }
}

fn parse_param(name: &str, value: Option<&str>) -> AppResult<Option<usize>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| {
            AppError::BadRequest(format!("{name} must be a non-negative integer, got {v}"))
        }),
    }
}

/// JSON body whose rejections use the structured error body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|e| AppError::BadRequest(e.body_text()))
    }
}
