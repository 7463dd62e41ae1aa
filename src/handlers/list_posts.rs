use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ErrorResponse, PostResponse};
use crate::services::post_service::PostService;
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, State},
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "All posts, newest first", body = [PostResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    UserService::resolve_identity(conn, &claims)?;

    let posts = PostService::list_all(conn)?
        .into_iter()
        .map(|(post, username, avatar)| {
            PostResponse::from_joined(post, username, avatar, &state.app_url)
        })
        .collect();

    Ok(Json(posts))
}
