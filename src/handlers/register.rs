use crate::config::security_config::create_token;
use crate::error::ApiError;
use crate::models::models::{AppState, AuthResponse, ErrorResponse, NewUser, RegisterRequest};
use crate::services::user_service::{UserService, DEFAULT_BIO};
use axum::{extract::State, http::StatusCode, Json};
use bcrypt::hash;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// An empty string counts as missing, same as an absent field.
fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 409, description = "Email or username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (name, username, email, password) = match (
        required(&payload.name),
        required(&payload.username),
        required(&payload.email),
        required(&payload.password),
    ) {
        (Some(name), Some(username), Some(email), Some(password)) => {
            (name, username, email, password)
        }
        _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
    };

    payload.validate().map_err(|e| {
        tracing::error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let hashed = hash(password, 12)?;

    let user = UserService::create(
        conn,
        NewUser {
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hashed,
            bio: Some(DEFAULT_BIO.to_string()),
        },
    )?;

    let token = create_token(&state, user.id)?;

    info!("User registered: id={} username={}", user.id, user.username);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user_id: user.id,
        }),
    ))
}
