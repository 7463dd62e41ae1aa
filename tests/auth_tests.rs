mod common;

use common::create_test_app_state;
use sociable::config::security_config::{create_token, verify_token};

#[tokio::test]
async fn test_token_round_trip_carries_user_id_and_expiry() {
    let state = create_test_app_state();

    let token = create_token(&state, 42).expect("token creation");
    assert!(!token.is_empty());

    let claims = verify_token(&state, &token).expect("token verification");
    assert_eq!(claims.sub, "42");

    // Default expiry window is 30 minutes
    assert_eq!(claims.exp - claims.iat, 30 * 60);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let state = create_test_app_state();

    assert!(verify_token(&state, "not.a.jwt").is_err());
    assert!(verify_token(&state, "").is_err());
}

#[tokio::test]
async fn test_token_signed_with_another_secret_rejected() {
    let state = create_test_app_state();
    let token = create_token(&state, 7).expect("token creation");

    let mut other = (*state).clone();
    other.jwt_secret = "another_secret_that_is_also_at_least_32_chars".to_string();

    assert!(verify_token(&other, &token).is_err());
}

#[test]
fn test_bcrypt_hash_and_verify() {
    let hash = bcrypt::hash("pw123", 12).expect("hashing");

    assert!(bcrypt::verify("pw123", &hash).unwrap());
    assert!(!bcrypt::verify("pw124", &hash).unwrap());

    // Salted: the same password never hashes to the same string twice
    let rehash = bcrypt::hash("pw123", 12).unwrap();
    assert_ne!(hash, rehash);
}
