use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ErrorResponse, UserResponse};
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    put,
    path = "/users/me",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Missing 'bio' field", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<UserResponse>, ApiError> {
    // Clients submit the bio as a multipart part. An empty string is a legal
    // value; only a missing part is rejected.
    let mut bio: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("bio") {
            bio = Some(
                field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Unreadable 'bio' field: {}", e)))?,
            );
        }
    }

    let bio = bio.ok_or_else(|| ApiError::BadRequest("Missing field 'bio'".to_string()))?;

    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let user = UserService::resolve_identity(conn, &claims)?;
    let updated = UserService::update_bio(conn, user.id, &bio)?;

    info!("User {} updated their bio", user.id);

    Ok(Json(UserResponse::from_user(&updated, &state.app_url)))
}
