use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{NewUser, User};
use crate::schema::users;
use diesel::prelude::*;
use tracing::{error, warn};

/// Default bio assigned to every freshly registered account.
pub const DEFAULT_BIO: &str = "Hi! I'm new here.";

pub struct UserService;

impl UserService {
    /// Maps verified JWT claims back to a user row. A token whose subject no
    /// longer exists (or never did) is simply unauthenticated.
    pub fn resolve_identity(conn: &mut PgConnection, claims: &Claims) -> Result<User, ApiError> {
        let user_id: i32 = claims
            .sub
            .parse()
            .map_err(|_| ApiError::Auth("Invalid token subject".to_string()))?;

        Self::find_by_id(conn, user_id)?.ok_or_else(|| {
            warn!("Token subject {} does not match any user", user_id);
            ApiError::Auth("Unknown user".to_string())
        })
    }

    pub fn find_by_id(conn: &mut PgConnection, user_id: i32) -> Result<Option<User>, ApiError> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to fetch user {}: {}", user_id, e);
                ApiError::Database(e)
            })
    }

    pub fn find_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<User>, ApiError> {
        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to fetch user by email: {}", e);
                ApiError::Database(e)
            })
    }

    /// Inserts a new account. Duplicate email/username surfaces as Conflict,
    /// both from the explicit pre-checks and from the unique constraints when
    /// two registrations race past them.
    pub fn create(conn: &mut PgConnection, new_user: NewUser) -> Result<User, ApiError> {
        conn.transaction::<User, ApiError, _>(|conn| {
            let email_taken: i64 = users::table
                .filter(users::email.eq(&new_user.email))
                .count()
                .get_result(conn)?;

            if email_taken > 0 {
                return Err(ApiError::Conflict("Email already exists".to_string()));
            }

            let username_taken: i64 = users::table
                .filter(users::username.eq(&new_user.username))
                .count()
                .get_result(conn)?;

            if username_taken > 0 {
                return Err(ApiError::Conflict("Username already exists".to_string()));
            }

            let user = diesel::insert_into(users::table)
                .values(&new_user)
                .returning(User::as_returning())
                .get_result(conn)?;

            Ok(user)
        })
    }

    pub fn update_bio(
        conn: &mut PgConnection,
        user_id: i32,
        bio: &str,
    ) -> Result<User, ApiError> {
        diesel::update(users::table.find(user_id))
            .set(users::bio.eq(bio))
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(|e| {
                error!("Failed to update bio for user {}: {}", user_id, e);
                ApiError::Database(e)
            })
    }

    /// Points the profile at an already-stored avatar file.
    pub fn set_avatar(
        conn: &mut PgConnection,
        user_id: i32,
        stored_name: &str,
    ) -> Result<User, ApiError> {
        diesel::update(users::table.find(user_id))
            .set(users::avatar_url.eq(stored_name))
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(|e| {
                error!("Failed to update avatar for user {}: {}", user_id, e);
                ApiError::Database(e)
            })
    }
}
