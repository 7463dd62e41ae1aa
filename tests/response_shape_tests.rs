use chrono::Utc;
use sociable::models::models::{Post, PostResponse, User, UserResponse};

fn sample_user() -> User {
    User {
        id: 7,
        name: "Ana".to_string(),
        username: "ana1".to_string(),
        email: "ana@x.com".to_string(),
        password_hash: "$2b$12$secret".to_string(),
        bio: Some("Hi! I'm new here.".to_string()),
        avatar_url: None,
    }
}

#[test]
fn test_user_response_never_exposes_password_hash() {
    let response = UserResponse::from_user(&sample_user(), "http://localhost:8080");
    let json = serde_json::to_value(&response).unwrap();

    assert!(json.get("password_hash").is_none());
    assert!(json.get("password").is_none());
    assert_eq!(json["username"], "ana1");
}

#[test]
fn test_user_avatar_url_is_fully_qualified_or_null() {
    let mut user = sample_user();

    let response = UserResponse::from_user(&user, "http://localhost:8080");
    assert_eq!(response.avatar_url, None);

    user.avatar_url = Some("abc.png".to_string());
    let response = UserResponse::from_user(&user, "http://localhost:8080");
    assert_eq!(
        response.avatar_url.as_deref(),
        Some("http://localhost:8080/uploads/abc.png")
    );
}

#[test]
fn test_post_response_joins_current_author_data() {
    let post = Post {
        id: 42,
        user_id: 7,
        description: "hello".to_string(),
        media_url: "deadbeef.png".to_string(),
        media_type: "image".to_string(),
        created_at: Utc::now(),
    };

    let response = PostResponse::from_joined(
        post,
        "ana1".to_string(),
        Some("avatar.jpg".to_string()),
        "http://localhost:8080",
    );

    assert_eq!(response.media_url, "http://localhost:8080/uploads/deadbeef.png");
    assert_eq!(
        response.user_avatar.as_deref(),
        Some("http://localhost:8080/uploads/avatar.jpg")
    );
    assert_eq!(response.media_type, "image");
    assert_eq!(response.username, "ana1");

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["user_id"], 7);
    assert_eq!(json["description"], "hello");
}
