mod common;

use chrono::{Duration, Utc};
use common::{cleanup_test_db, create_test_db_pool, run_test_migrations};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::PgConnection;
use sociable::error::ApiError;
use sociable::models::models::{NewPost, NewUser, User};
use sociable::schema::{posts, users};
use sociable::services::post_service::PostService;
use sociable::services::user_service::{UserService, DEFAULT_BIO};
use std::sync::Mutex;

type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

// The tests in this file share tables and truncate them between runs, so
// they take turns.
static DB_LOCK: Mutex<()> = Mutex::new(());

/// These tests need a live database; they no-op unless TEST_DATABASE_URL
/// points at one.
fn test_conn() -> Option<DbConn> {
    if std::env::var("TEST_DATABASE_URL").is_err() {
        eprintln!("TEST_DATABASE_URL not set; skipping database test");
        return None;
    }

    let pool = create_test_db_pool();
    let mut conn = pool
        .get()
        .expect("TEST_DATABASE_URL is set but not reachable");

    run_test_migrations(&mut conn);
    cleanup_test_db(&mut conn);

    Some(conn)
}

fn register_user(conn: &mut PgConnection, username: &str, email: &str) -> User {
    UserService::create(
        conn,
        NewUser {
            name: username.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            bio: Some(DEFAULT_BIO.to_string()),
        },
    )
    .expect("user insert should succeed")
}

fn publish(conn: &mut PgConnection, author: &User, description: &str, age_minutes: i64) -> i32 {
    let (post, _, _) = PostService::create(
        conn,
        NewPost {
            user_id: author.id,
            description: description.to_string(),
            media_url: format!("{}.png", uuid::Uuid::new_v4()),
            media_type: "image".to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        },
    )
    .expect("post insert should succeed");

    post.id
}

#[test]
fn test_listings_are_newest_first() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let Some(mut conn) = test_conn() else { return };

    let ana = register_user(&mut conn, "ana1", "ana@x.com");
    let bob = register_user(&mut conn, "bob1", "bob@x.com");

    // Inserted out of chronological order on purpose
    publish(&mut conn, &ana, "middle", 30);
    publish(&mut conn, &bob, "newest", 5);
    publish(&mut conn, &ana, "oldest", 60);

    let all = PostService::list_all(&mut conn).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].0.description, "newest");
    for pair in all.windows(2) {
        assert!(
            pair[0].0.created_at >= pair[1].0.created_at,
            "posts must be ordered newest first"
        );
    }

    let anas = PostService::list_by_user(&mut conn, ana.id).unwrap();
    assert_eq!(anas.len(), 2);
    assert!(anas.iter().all(|(post, username, _)| {
        post.user_id == ana.id && username == "ana1"
    }));
    assert_eq!(anas[0].0.description, "middle");

    // An author nobody has heard of simply has no posts
    let nobody = PostService::list_by_user(&mut conn, ana.id + bob.id + 1000).unwrap();
    assert!(nobody.is_empty());
}

#[test]
fn test_only_the_author_may_edit_or_delete() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let Some(mut conn) = test_conn() else { return };

    let ana = register_user(&mut conn, "ana1", "ana@x.com");
    let bob = register_user(&mut conn, "bob1", "bob@x.com");
    let post_id = publish(&mut conn, &ana, "hello", 0);

    // A non-author gets Forbidden on both mutations
    let err = PostService::update_description(&mut conn, bob.id, post_id, "hijacked").unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    let err = PostService::delete(&mut conn, bob.id, post_id).unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    // The failed attempts changed nothing
    let (post, _, _) = PostService::find_joined(&mut conn, post_id).unwrap().unwrap();
    assert_eq!(post.description, "hello");

    // The author succeeds at both
    let (post, username, _) =
        PostService::update_description(&mut conn, ana.id, post_id, "edited").unwrap();
    assert_eq!(post.description, "edited");
    assert_eq!(username, "ana1");

    PostService::delete(&mut conn, ana.id, post_id).unwrap();
    assert!(PostService::find_joined(&mut conn, post_id).unwrap().is_none());

    // Gone means NotFound from then on
    let err = PostService::delete(&mut conn, ana.id, post_id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_duplicate_registration_conflicts() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let Some(mut conn) = test_conn() else { return };

    register_user(&mut conn, "ana1", "ana@x.com");

    // Same email, different username
    let err = UserService::create(
        &mut conn,
        NewUser {
            name: "Ana Clone".to_string(),
            username: "ana2".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            bio: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    // Same username, different email
    let err = UserService::create(
        &mut conn,
        NewUser {
            name: "Ana Clone".to_string(),
            username: "ana1".to_string(),
            email: "ana2@x.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            bio: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    // The failed registrations inserted nothing
    let count: i64 = users::table.count().get_result(&mut conn).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_deleting_a_user_removes_their_posts() {
    let _guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let Some(mut conn) = test_conn() else { return };

    let ana = register_user(&mut conn, "ana1", "ana@x.com");
    publish(&mut conn, &ana, "first", 10);
    publish(&mut conn, &ana, "second", 5);

    diesel::delete(users::table.find(ana.id))
        .execute(&mut conn)
        .unwrap();

    let orphans: i64 = posts::table
        .filter(posts::user_id.eq(ana.id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(orphans, 0);
}
