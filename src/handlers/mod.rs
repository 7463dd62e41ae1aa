pub mod create_post;
pub mod current_user;
pub mod delete_post;
pub mod get_post;
pub mod get_user;
pub mod health;
pub mod list_posts;
pub mod login;
pub mod register;
pub mod update_avatar;
pub mod update_post;
pub mod update_profile;
pub mod user_posts;
