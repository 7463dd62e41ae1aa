use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ErrorResponse};
use crate::services::post_service::PostService;
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    delete,
    path = "/posts/{post_id}",
    params(("post_id" = i32, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(post_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let user = UserService::resolve_identity(conn, &claims)?;

    PostService::delete(conn, user.id, post_id)?;

    info!("User {} deleted post {}", user.id, post_id);

    Ok(StatusCode::NO_CONTENT)
}
