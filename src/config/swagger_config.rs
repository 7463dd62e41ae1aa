use crate::handlers::{
    create_post::__path_create_post, current_user::__path_current_user,
    delete_post::__path_delete_post, get_post::__path_get_post, get_user::__path_get_user,
    health::__path_health_check, list_posts::__path_list_posts, login::__path_login,
    register::__path_register, update_avatar::__path_update_avatar,
    update_post::__path_update_post, update_profile::__path_update_profile,
    user_posts::__path_user_posts,
};
use crate::models::models::*;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        register, login, current_user, get_user, update_profile, update_avatar,
        list_posts, user_posts, get_post, create_post, update_post, delete_post,
        health_check
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        PostResponse,
        ErrorResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "Profiles and avatars"),
        (name = "Posts", description = "Publishing and browsing posts"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // Define the security scheme in components.securitySchemes
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
