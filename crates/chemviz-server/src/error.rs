//! Server-specific error types

use crate::api::response::ErrorResponse;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chemviz_core::{CoreError, ErrorKind};
use thiserror::Error;

/// Result type alias for handlers
pub type ServerResult<T> = std::result::Result<T, ApiError>;

/// Errors returned by HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid multipart request: {0}")]
    Multipart(#[from] MultipartError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e.kind() {
                ErrorKind::Validation | ErrorKind::Parse | ErrorKind::EmptyDataset => {
                    StatusCode::BAD_REQUEST
                },
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Render | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Multipart(e) => e.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error = match &self {
            ApiError::Core(e) => match e.kind() {
                ErrorKind::Render => {
                    tracing::error!("Report rendering failed: {}", e);
                    ErrorResponse::new(ErrorKind::Render.code(), "Failed to render report")
                },
                ErrorKind::Internal => {
                    tracing::error!("Internal error: {:?}", e);
                    ErrorResponse::new(ErrorKind::Internal.code(), "An internal error occurred")
                },
                kind => ErrorResponse::new(kind.code(), e.to_string()),
            },
            ApiError::Multipart(e) => {
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "VALIDATION_ERROR"
                };
                ErrorResponse::new(code, e.body_text())
            },
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CoreError::NoFile, StatusCode::BAD_REQUEST),
            (CoreError::MissingColumns(vec!["Type".to_string()]), StatusCode::BAD_REQUEST),
            (CoreError::EmptyDataset, StatusCode::BAD_REQUEST),
            (CoreError::dataset_not_found(&Uuid::nil()), StatusCode::NOT_FOUND),
            (CoreError::render("broken"), StatusCode::INTERNAL_SERVER_ERROR),
            (CoreError::corrupt("gone"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response = ApiError::from(CoreError::corrupt("blob path /srv/data")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("INTERNAL_ERROR"));
        assert!(!body.contains("/srv/data"));
    }
}
