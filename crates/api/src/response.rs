//! API response types.

use axum::response::{IntoResponse, Response};
use stream_registry_common::AppError;

/// Error response whose 5xx form carries no body.
///
/// The list and delete routes answer server failures with a bare status.
/// Client errors keep the structured body.
#[derive(Debug)]
pub struct BareServerError(pub AppError);

impl From<AppError> for BareServerError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BareServerError {
    fn into_response(self) -> Response {
        let Self(err) = self;
        if err.is_server_error() {
            err.status_code().into_response()
        } else {
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_server_error_has_no_body() {
        let response = BareServerError(AppError::Internal("boom".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_client_error_keeps_structured_body() {
        let response =
            BareServerError(AppError::NotFound("Stream not found: x".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["message"], "Stream not found: x");
    }
}
