use crate::{
    dtos::seminar::{CreatedResponse, ErrorResponse},
    error::ApiError,
    routes::auth::caller_id,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::seminar::SeminarService;
use models::seminar_data::{
    SeminarDeleteInfo, SeminarDetails, SeminarEditForm, SeminarForm, SeminarInfo,
};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// List every seminar that has not been deleted
#[utoipa::path(
    get,
    path = "/seminars",
    responses(
        (status = 200, description = "Seminars retrieved successfully", body = Vec<SeminarInfo>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn get_seminars(
    State(state): State<AppState>,
) -> Result<Json<Vec<SeminarInfo>>, ApiError> {
    Ok(Json(SeminarService::list_all(&state.db).await?))
}

/// Create a seminar organized by the caller
#[utoipa::path(
    post,
    path = "/seminars",
    request_body = SeminarForm,
    responses(
        (status = 201, description = "Seminar created", body = CreatedResponse),
        (status = 422, description = "Invalid form fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn create_seminar(
    State(state): State<AppState>,
    Extension(claims): Extension<DefaultClaims>,
    Json(form): Json<SeminarForm>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let organizer_id = caller_id(&claims)?;
    let id = SeminarService::create_seminar(&state.db, &state.rules, organizer_id, form).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List the seminars the caller has joined
#[utoipa::path(
    get,
    path = "/seminars/joined",
    responses(
        (status = 200, description = "Joined seminars retrieved successfully", body = Vec<SeminarInfo>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn get_joined_seminars(
    State(state): State<AppState>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<Vec<SeminarInfo>>, ApiError> {
    let participant_id = caller_id(&claims)?;

    Ok(Json(
        SeminarService::list_joined(&state.db, participant_id).await?,
    ))
}

/// Get a specific seminar by ID
#[utoipa::path(
    get,
    path = "/seminars/{id}",
    params(("id" = i32, Path, description = "Seminar ID")),
    responses(
        (status = 200, description = "Seminar found", body = SeminarDetails),
        (status = 404, description = "Seminar not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn get_seminar_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SeminarDetails>, ApiError> {
    Ok(Json(SeminarService::get_details(&state.db, id).await?))
}

/// Get a seminar as a prefilled edit form
#[utoipa::path(
    get,
    path = "/seminars/{id}/edit",
    params(("id" = i32, Path, description = "Seminar ID")),
    responses(
        (status = 200, description = "Edit form", body = SeminarEditForm),
        (status = 404, description = "Seminar not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn get_edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SeminarEditForm>, ApiError> {
    Ok(Json(SeminarService::get_edit_form(&state.db, id).await?))
}

/// Overwrite a seminar the caller organizes
#[utoipa::path(
    put,
    path = "/seminars/{id}",
    params(("id" = i32, Path, description = "Seminar ID")),
    request_body = SeminarForm,
    responses(
        (status = 204, description = "Seminar updated"),
        (status = 403, description = "Caller is not the organizer", body = ErrorResponse),
        (status = 404, description = "Seminar not found", body = ErrorResponse),
        (status = 422, description = "Invalid form fields", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn edit_seminar(
    State(state): State<AppState>,
    Extension(claims): Extension<DefaultClaims>,
    Path(id): Path<i32>,
    Json(form): Json<SeminarForm>,
) -> Result<StatusCode, ApiError> {
    let caller = caller_id(&claims)?;
    SeminarService::edit_seminar(&state.db, &state.rules, id, caller, form).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get what the organizer confirms before deleting
#[utoipa::path(
    get,
    path = "/seminars/{id}/delete",
    params(("id" = i32, Path, description = "Seminar ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = SeminarDeleteInfo),
        (status = 404, description = "Seminar not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn get_delete_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SeminarDeleteInfo>, ApiError> {
    Ok(Json(SeminarService::get_delete_info(&state.db, id).await?))
}

/// Soft-delete a seminar the caller organizes
#[utoipa::path(
    delete,
    path = "/seminars/{id}",
    params(("id" = i32, Path, description = "Seminar ID")),
    responses(
        (status = 204, description = "Seminar deleted"),
        (status = 403, description = "Caller is not the organizer", body = ErrorResponse),
        (status = 404, description = "Seminar not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn delete_seminar(
    State(state): State<AppState>,
    Extension(claims): Extension<DefaultClaims>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let caller = caller_id(&claims)?;
    SeminarService::soft_delete(&state.db, id, caller).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join a seminar as the caller
#[utoipa::path(
    post,
    path = "/seminars/{id}/join",
    params(("id" = i32, Path, description = "Seminar ID")),
    responses(
        (status = 204, description = "Joined"),
        (status = 404, description = "Seminar not found or already joined", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn join_seminar(
    State(state): State<AppState>,
    Extension(claims): Extension<DefaultClaims>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let participant_id = caller_id(&claims)?;
    SeminarService::join(&state.db, id, participant_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Leave a seminar the caller has joined
#[utoipa::path(
    post,
    path = "/seminars/{id}/leave",
    params(("id" = i32, Path, description = "Seminar ID")),
    responses(
        (status = 204, description = "Left"),
        (status = 404, description = "Seminar not found or not joined", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Seminars"
)]
pub async fn leave_seminar(
    State(state): State<AppState>,
    Extension(claims): Extension<DefaultClaims>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let participant_id = caller_id(&claims)?;
    SeminarService::leave(&state.db, id, participant_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
