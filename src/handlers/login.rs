use crate::config::security_config::create_token;
use crate::error::ApiError;
use crate::models::models::{AppState, AuthResponse, ErrorResponse, LoginRequest};
use crate::services::user_service::UserService;
use axum::{extract::State, Json};
use bcrypt::verify;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

// Any syntactically valid bcrypt hash works here; it only has to cost the
// same as a real verification.
const DUMMY_HASH: &str = "$2b$12$gkwpvQvqEJ8TSUPTesTesue5dBXTRIVWAGUmUT6nXOGIpZS0AJ/fK";

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, password) = match (payload.email.as_deref(), payload.password.as_deref()) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
    };

    payload.validate().map_err(|e| {
        tracing::error!("Validation error for login: {}", e);
        ApiError::Validation(e)
    })?;

    let conn = &mut state.db.get().map_err(|e| {
        tracing::error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let user = match UserService::find_by_email(conn, email)? {
        Some(user) => user,
        None => {
            // Dummy verification so an unknown email takes as long as a
            // wrong password; never reveal which of the two failed.
            let _ = verify(password, DUMMY_HASH);
            tracing::warn!("Login attempt for unknown email");
            return Err(ApiError::Auth("Invalid email or password".to_string()));
        }
    };

    if !verify(password, &user.password_hash)? {
        tracing::warn!("Invalid password for user {}", user.id);
        return Err(ApiError::Auth("Invalid email or password".to_string()));
    }

    let token = create_token(&state, user.id)?;

    info!("User {} logged in successfully", user.id);

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
    }))
}
