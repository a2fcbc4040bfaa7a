use crate::dtos::seminar::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing subject in token claims")]
    Unauthorized,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

// Tell axum how to convert `ApiError` into a response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("missing subject in token claims"),
            ),
            Self::Service(ServiceError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    message: "validation failed".to_string(),
                    errors: serde_json::to_value(&errors).ok(),
                },
            ),
            Self::Service(ServiceError::Forbidden) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new("only the organizer may modify this seminar"),
            ),
            Self::Service(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, ErrorResponse::new("seminar not found"))
            }
            Self::Service(err) => {
                error!("Request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
