use crate::schema::{posts, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2;
use diesel::r2d2::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(User))]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub media_url: String,
    pub media_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub user_id: i32,
    pub description: String,
    pub media_url: String,
    pub media_type: String,
    pub created_at: DateTime<Utc>,
}

type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub jwt_secret: String,
    pub app_url: String,
    pub upload_dir: PathBuf,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Username must not be empty"))]
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
}

/// Public shape of a user profile. The password hash never leaves the
/// database row, and the avatar is expanded to a fully-qualified URL.
#[derive(Serialize, ToSchema, Debug)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserResponse {
    pub fn from_user(user: &User, app_url: &str) -> Self {
        UserResponse {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar_url: user
                .avatar_url
                .as_deref()
                .map(|name| format!("{}/uploads/{}", app_url, name)),
        }
    }
}

/// A post joined with its author's current display data. The username and
/// avatar always reflect the author's profile at read time, not a snapshot
/// taken when the post was created.
#[derive(Serialize, ToSchema, Debug)]
pub struct PostResponse {
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub username: String,
    pub user_avatar: Option<String>,
    pub media_url: String,
    pub media_type: String,
    pub created_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn from_joined(post: Post, username: String, avatar: Option<String>, app_url: &str) -> Self {
        PostResponse {
            id: post.id,
            user_id: post.user_id,
            description: post.description,
            username,
            user_avatar: avatar.map(|name| format!("{}/uploads/{}", app_url, name)),
            media_url: format!("{}/uploads/{}", app_url, post.media_url),
            media_type: post.media_type,
            created_at: post.created_at,
        }
    }
}
