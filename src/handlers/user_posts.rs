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
    path = "/users/{user_id}/posts",
    params(("user_id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "The author's posts, newest first", body = [PostResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn user_posts(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    UserService::resolve_identity(conn, &claims)?;

    // An unknown author simply has no posts; no 404 here.
    let posts = PostService::list_by_user(conn, user_id)?
        .into_iter()
        .map(|(post, username, avatar)| {
            PostResponse::from_joined(post, username, avatar, &state.app_url)
        })
        .collect();

    Ok(Json(posts))
}
