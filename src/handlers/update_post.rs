use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ErrorResponse, PostResponse};
use crate::services::post_service::PostService;
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    put,
    path = "/posts/{post_id}",
    params(("post_id" = i32, Path, description = "Post id")),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 400, description = "Missing 'description' field", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(post_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<PostResponse>, ApiError> {
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("description") {
            description = Some(field.text().await.map_err(|e| {
                ApiError::BadRequest(format!("Unreadable 'description' field: {}", e))
            })?);
        }
    }

    let description =
        description.ok_or_else(|| ApiError::BadRequest("Missing field 'description'".to_string()))?;

    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let user = UserService::resolve_identity(conn, &claims)?;

    let (post, username, avatar) =
        PostService::update_description(conn, user.id, post_id, &description)?;

    info!("User {} edited post {}", user.id, post_id);

    Ok(Json(PostResponse::from_joined(
        post,
        username,
        avatar,
        &state.app_url,
    )))
}
