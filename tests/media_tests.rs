mod common;

use common::test_upload_dir;
use sociable::error::ApiError;
use sociable::media::{allowed_extension, classify, file_extension, save_upload, MediaType};

#[test]
fn test_extension_allow_list() {
    assert_eq!(allowed_extension("photo.png").unwrap(), "png");
    assert_eq!(allowed_extension("clip.mp4").unwrap(), "mp4");
    // Case-insensitive on the extension
    assert_eq!(allowed_extension("PHOTO.JPG").unwrap(), "jpg");

    assert!(matches!(
        allowed_extension("malware.exe"),
        Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(
        allowed_extension("no_extension"),
        Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(
        allowed_extension("trailing_dot."),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn test_file_extension_parsing() {
    assert_eq!(file_extension("a.b.c.GIF"), Some("gif".to_string()));
    assert_eq!(file_extension("noext"), None);
    assert_eq!(file_extension("dot."), None);
}

#[test]
fn test_classification() {
    assert_eq!(classify("png"), MediaType::Image);
    assert_eq!(classify("jpg"), MediaType::Image);
    assert_eq!(classify("jpeg"), MediaType::Image);
    assert_eq!(classify("gif"), MediaType::Image);
    assert_eq!(classify("mp4"), MediaType::Video);

    assert_eq!(MediaType::Image.as_str(), "image");
    assert_eq!(MediaType::Video.as_str(), "video");
}

#[test]
fn test_save_upload_roundtrip() {
    let dir = test_upload_dir();
    let bytes = b"\x89PNG fake image bytes";

    let stored = save_upload(&dir, "selfie.PNG", bytes).expect("save should succeed");

    // Stored under a generated name that keeps the (lowercased) extension
    assert!(stored.ends_with(".png"));
    assert_ne!(stored, "selfie.PNG");

    let written = std::fs::read(dir.join(&stored)).expect("stored file readable");
    assert_eq!(written, bytes);

    // A second save of the same file gets a different name
    let stored_again = save_upload(&dir, "selfie.PNG", bytes).unwrap();
    assert_ne!(stored, stored_again);
}

#[test]
fn test_disallowed_upload_persists_nothing() {
    let dir = test_upload_dir();

    let result = save_upload(&dir, "script.exe", b"MZ");
    assert!(matches!(result, Err(ApiError::BadRequest(_))));

    // Rejected before any write: the directory stays empty
    let entries = std::fs::read_dir(&dir).unwrap().count();
    assert_eq!(entries, 0);
}
