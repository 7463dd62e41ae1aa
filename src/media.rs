use crate::error::ApiError;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

/// Extensions accepted for any upload (avatar or post media).
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "mp4"];

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

/// Lowercased extension of `filename`, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Validates the original filename against the allow-list and returns its
/// lowercased extension. Runs before anything touches the filesystem.
pub fn allowed_extension(filename: &str) -> Result<String, ApiError> {
    let ext = file_extension(filename)
        .ok_or_else(|| ApiError::BadRequest("File has no extension".to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "File type '.{}' is not allowed",
            ext
        )));
    }

    Ok(ext)
}

/// png/jpg/jpeg/gif are images; everything else on the allow-list (mp4) is video.
pub fn classify(extension: &str) -> MediaType {
    if IMAGE_EXTENSIONS.contains(&extension) {
        MediaType::Image
    } else {
        MediaType::Video
    }
}

/// Persists an upload under a fresh UUID name preserving the original
/// extension, and returns the stored name. The generated name is unique, so
/// concurrent uploads never race on the same path and nothing is overwritten.
pub fn save_upload(
    upload_dir: &Path,
    original_filename: &str,
    bytes: &[u8],
) -> Result<String, ApiError> {
    let ext = allowed_extension(original_filename)?;

    let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
    let path = upload_dir.join(&stored_name);

    fs::write(&path, bytes).map_err(|e| {
        error!("Failed to write upload to {}: {}", path.display(), e);
        ApiError::Io(e)
    })?;

    info!(
        "Stored upload '{}' as {} ({} bytes)",
        original_filename,
        stored_name,
        bytes.len()
    );

    Ok(stored_name)
}

/// Creates the upload directory if it does not exist yet.
pub fn ensure_upload_dir(upload_dir: &Path) -> Result<(), ApiError> {
    fs::create_dir_all(upload_dir).map_err(|e| {
        error!(
            "Failed to create upload directory {}: {}",
            upload_dir.display(),
            e
        );
        ApiError::Io(e)
    })
}
