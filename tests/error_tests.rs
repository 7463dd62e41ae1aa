use diesel::result::{DatabaseErrorKind, Error as DieselError};
use http::StatusCode;
use sociable::error::ApiError;
use validator::ValidationErrors;

#[test]
fn test_api_error_to_status_code_mapping() {
    // Database NotFound -> 404
    let err = ApiError::Database(DieselError::NotFound);
    let (status, _): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Database other error -> 500 Internal Server Error
    let err = ApiError::Database(DieselError::QueryBuilderError("broken".into()));
    let (status, _): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // Validation error -> 400 Bad Request
    let err = ApiError::Validation(ValidationErrors::new());
    let (status, _): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let err = ApiError::BadRequest("Missing field 'bio'".to_string());
    let (status, _): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Auth error -> 401 Unauthorized
    let err = ApiError::Auth("Token expired".to_string());
    let (status, _): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Ownership violation -> 403 Forbidden
    let err = ApiError::Forbidden("You are not the author of this post".to_string());
    let (status, _): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::FORBIDDEN);

    let err = ApiError::NotFound("Post not found".to_string());
    let (status, _): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Uniqueness violation -> 409 Conflict
    let err = ApiError::Conflict("Email already exists".to_string());
    let (status, _): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::CONFLICT);

    // Database connection error -> 500 Internal Server Error
    let err = ApiError::DatabaseConnection("Pool timeout".to_string());
    let (status, msg): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(msg.contains("Database connection error"));
}

#[test]
fn test_unique_violation_translates_to_conflict() {
    // A raced INSERT that trips the unique constraint must surface as 409,
    // never as a raw database error.
    let err: ApiError = DieselError::DatabaseError(
        DatabaseErrorKind::UniqueViolation,
        Box::new("duplicate key value violates unique constraint".to_string()),
    )
    .into();

    assert!(matches!(err, ApiError::Conflict(_)));

    let (status, msg): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(msg.contains("already exists"));
}

#[test]
fn test_api_error_display() {
    let err = ApiError::Auth("Unauthorized access".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Authentication error"));
    assert!(display.contains("Unauthorized access"));

    let err = ApiError::Forbidden("not the author".to_string());
    assert!(format!("{}", err).contains("Forbidden"));
}
