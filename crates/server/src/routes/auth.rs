use crate::error::ApiError;
use axum::{Extension, http::StatusCode};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// The caller's identity: the subject of their JWT
pub fn caller_id(claims: &DefaultClaims) -> Result<&str, ApiError> {
    claims.sub.as_deref().ok_or(ApiError::Unauthorized)
}

/// Returns the user identifier seminars are organized and joined under
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Successfully authenticated", content_type = "text/plain", body = String),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn me(claims: Extension<DefaultClaims>) -> Result<(StatusCode, String), ApiError> {
    let sub = caller_id(&claims)?;

    Ok((StatusCode::OK, sub.to_string()))
}
