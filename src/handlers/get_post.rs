use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ErrorResponse, PostResponse};
use crate::services::post_service::PostService;
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    params(("post_id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(post_id): Path<i32>,
) -> Result<Json<PostResponse>, ApiError> {
    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    UserService::resolve_identity(conn, &claims)?;

    let (post, username, avatar) = PostService::find_joined(conn, post_id)?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(PostResponse::from_joined(
        post,
        username,
        avatar,
        &state.app_url,
    )))
}
