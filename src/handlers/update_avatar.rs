use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::media;
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
    path = "/users/me/avatar",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Missing or disallowed file", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_avatar(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<UserResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(ToString::to_string)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| ApiError::BadRequest("Empty filename".to_string()))?;

            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Unreadable file field: {}", e)))?;

            upload = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing field 'file'".to_string()))?;

    // A disallowed extension is rejected before any bytes hit the filesystem.
    media::allowed_extension(&filename)?;

    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let user = UserService::resolve_identity(conn, &claims)?;

    let stored_name = media::save_upload(&state.upload_dir, &filename, &bytes)?;
    let updated = UserService::set_avatar(conn, user.id, &stored_name)?;

    info!("User {} updated their avatar to {}", user.id, stored_name);

    Ok(Json(UserResponse::from_user(&updated, &state.app_url)))
}
