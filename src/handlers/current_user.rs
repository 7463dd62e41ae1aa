use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ErrorResponse, UserResponse};
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, State},
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Caller's own profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserResponse>, ApiError> {
    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let user = UserService::resolve_identity(conn, &claims)?;

    Ok(Json(UserResponse::from_user(&user, &state.app_url)))
}
