use crate::error::ApiError;
use crate::models::models::{NewPost, Post};
use crate::schema::{posts, users};
use diesel::prelude::*;
use tracing::error;

/// A post row paired with its author's current username and avatar.
pub type JoinedPost = (Post, String, Option<String>);

pub struct PostService;

impl PostService {
    /// Every post, newest first, joined with current author display data.
    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<JoinedPost>, ApiError> {
        posts::table
            .inner_join(users::table)
            .select((Post::as_select(), users::username, users::avatar_url))
            .order(posts::created_at.desc())
            .load(conn)
            .map_err(|e| {
                error!("Failed to list posts: {}", e);
                ApiError::Database(e)
            })
    }

    /// One author's posts, newest first. An unknown author yields an empty
    /// list rather than an error.
    pub fn list_by_user(
        conn: &mut PgConnection,
        author_id: i32,
    ) -> Result<Vec<JoinedPost>, ApiError> {
        posts::table
            .inner_join(users::table)
            .filter(posts::user_id.eq(author_id))
            .select((Post::as_select(), users::username, users::avatar_url))
            .order(posts::created_at.desc())
            .load(conn)
            .map_err(|e| {
                error!("Failed to list posts for user {}: {}", author_id, e);
                ApiError::Database(e)
            })
    }

    pub fn find_joined(
        conn: &mut PgConnection,
        post_id: i32,
    ) -> Result<Option<JoinedPost>, ApiError> {
        posts::table
            .inner_join(users::table)
            .filter(posts::id.eq(post_id))
            .select((Post::as_select(), users::username, users::avatar_url))
            .first(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to fetch post {}: {}", post_id, e);
                ApiError::Database(e)
            })
    }

    pub fn create(conn: &mut PgConnection, new_post: NewPost) -> Result<JoinedPost, ApiError> {
        let post: Post = diesel::insert_into(posts::table)
            .values(&new_post)
            .returning(Post::as_returning())
            .get_result(conn)
            .map_err(|e| {
                error!("Failed to insert post: {}", e);
                ApiError::Database(e)
            })?;

        Self::find_joined(conn, post.id)?
            .ok_or_else(|| ApiError::Internal("Inserted post vanished".to_string()))
    }

    /// Replaces a post's description. Only the author may edit; the media
    /// fields are immutable after creation.
    pub fn update_description(
        conn: &mut PgConnection,
        identity_id: i32,
        post_id: i32,
        description: &str,
    ) -> Result<JoinedPost, ApiError> {
        Self::check_ownership(conn, identity_id, post_id)?;

        diesel::update(posts::table.find(post_id))
            .set(posts::description.eq(description))
            .execute(conn)
            .map_err(|e| {
                error!("Failed to update post {}: {}", post_id, e);
                ApiError::Database(e)
            })?;

        Self::find_joined(conn, post_id)?
            .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))
    }

    /// Permanently removes a post. Only the author may delete.
    pub fn delete(conn: &mut PgConnection, identity_id: i32, post_id: i32) -> Result<(), ApiError> {
        Self::check_ownership(conn, identity_id, post_id)?;

        diesel::delete(posts::table.find(post_id))
            .execute(conn)
            .map_err(|e| {
                error!("Failed to delete post {}: {}", post_id, e);
                ApiError::Database(e)
            })?;

        Ok(())
    }

    fn check_ownership(
        conn: &mut PgConnection,
        identity_id: i32,
        post_id: i32,
    ) -> Result<(), ApiError> {
        let author_id: Option<i32> = posts::table
            .find(post_id)
            .select(posts::user_id)
            .first(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to fetch post {}: {}", post_id, e);
                ApiError::Database(e)
            })?;

        match author_id {
            None => Err(ApiError::NotFound("Post not found".to_string())),
            Some(author_id) if author_id != identity_id => Err(ApiError::Forbidden(
                "You are not the author of this post".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}
