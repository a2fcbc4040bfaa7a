use crate::{error::ApiError, state::AppState};
use axum::{Json, extract::State};
use database::{error::ServiceError, services::category::CategoryService};
use models::seminar_data::CategoryOption;

/// List the categories a seminar can be filed under
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = Vec<CategoryOption>),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Categories"
)]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryOption>>, ApiError> {
    let categories = CategoryService::list_categories(&state.db)
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(categories))
}
