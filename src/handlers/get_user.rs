use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ErrorResponse, UserResponse};
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    UserService::resolve_identity(conn, &claims)?;

    let user = UserService::find_by_id(conn, user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from_user(&user, &state.app_url)))
}
