use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::media;
use crate::models::models::{AppState, ErrorResponse, NewPost, PostResponse};
use crate::services::post_service::PostService;
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    post,
    path = "/posts",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing description/file or disallowed file type", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let mut description: Option<String> = None;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("description") => {
                description = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Unreadable 'description' field: {}", e))
                })?);
            }
            Some("file") => {
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
            _ => {}
        }
    }

    let description =
        description.ok_or_else(|| ApiError::BadRequest("Missing field 'description'".to_string()))?;
    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing field 'file'".to_string()))?;

    let ext = media::allowed_extension(&filename)?;

    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let user = UserService::resolve_identity(conn, &claims)?;

    let stored_name = media::save_upload(&state.upload_dir, &filename, &bytes)?;
    let media_type = media::classify(&ext);

    let (post, username, avatar) = PostService::create(
        conn,
        NewPost {
            user_id: user.id,
            description,
            media_url: stored_name,
            media_type: media_type.as_str().to_string(),
            created_at: Utc::now(),
        },
    )?;

    info!("User {} published post {}", user.id, post.id);

    Ok((
        StatusCode::CREATED,
        Json(PostResponse::from_joined(
            post,
            username,
            avatar,
            &state.app_url,
        )),
    ))
}
