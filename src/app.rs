use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::security_config::auth_middleware;
use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    create_post::create_post, current_user::current_user, delete_post::delete_post,
    get_post::get_post, get_user::get_user, health::health_check, list_posts::list_posts,
    login::login, register::register, update_avatar::update_avatar, update_post::update_post,
    update_profile::update_profile, user_posts::user_posts,
};
use crate::models::models::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication)
    let public_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/auth/register", axum::routing::post(register))
        .route("/auth/login", axum::routing::post(login))
        .route("/health", axum::routing::get(health_check))
        // Stored media is a static byte passthrough; unknown names are 404.
        .nest_service("/uploads", ServeDir::new(&state.upload_dir));

    // Protected routes (require JWT authentication)
    let protected_router = Router::new()
        .route("/users/me", axum::routing::get(current_user))
        .route("/users/me", axum::routing::put(update_profile))
        .route("/users/me/avatar", axum::routing::put(update_avatar))
        .route("/users/{user_id}", axum::routing::get(get_user))
        .route("/users/{user_id}/posts", axum::routing::get(user_posts))
        .route("/posts", axum::routing::get(list_posts))
        .route("/posts", axum::routing::post(create_post))
        .route("/posts/{post_id}", axum::routing::get(get_post))
        .route("/posts/{post_id}", axum::routing::put(update_post))
        .route("/posts/{post_id}", axum::routing::delete(delete_post))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_router)
        .merge(protected_router)
        .with_state(state)
}
