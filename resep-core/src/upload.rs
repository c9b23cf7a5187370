//! Image upload client.
//!
//! Validates the file locally (type and size) before any network call,
//! then submits it as multipart form data under the `image` field with
//! a timeout longer than the default request timeout.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;

/// Timeout for upload requests; uploads are allowed to take longer
/// than regular API calls.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum accepted image size (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Multipart form field the server reads the image from.
pub const IMAGE_FIELD: &str = "image";


/// Errors that can occur validating or uploading an image.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file provided: {0}")]
    FileNotFound(String),

    #[error("File is empty: {0}")]
    EmptyFile(String),

    #[error("Invalid file type '{0}'. Allowed: .jpg, .jpeg, .png, .webp")]
    InvalidType(String),

    #[error("File size exceeds 5MB limit ({0} bytes)")]
    TooLarge(u64),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Transport failure, normalized to a message with the original
    /// error attached as the source.
    #[error("Upload failed: {message}")]
    Request {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upload rejected ({status}): {message}")]
    Http { status: u16, message: String },
}

/// Validated image metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub mime: &'static str,
    pub size: u64,
}

/// Checks that the path names an acceptable image without reading it.
///
/// Fails fast on a missing or empty file, a disallowed extension, or a
/// size over [`MAX_IMAGE_BYTES`]; no network call is made for invalid
/// input.
pub fn validate_image(path: &Path) -> Result<ImageInfo, UploadError> {
    let metadata = std::fs::metadata(path)
        .map_err(|_| UploadError::FileNotFound(path.display().to_string()))?;

    if metadata.len() == 0 {
        return Err(UploadError::EmptyFile(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => {
            return Err(UploadError::InvalidType(if extension.is_empty() {
                path.display().to_string()
            } else {
                extension
            }))
        }
    };

    let size = metadata.len();
    if size > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge(size));
    }

    Ok(ImageInfo { mime, size })
}

/// Client for the image upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadClient {
    base_url: String,
    http: reqwest::Client,
}

impl UploadClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Validates and uploads an image, returning the server's reply.
    pub async fn upload(&self, path: &Path) -> Result<Value, UploadError> {
        let info = validate_image(path)?;

        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(info.mime)
            .map_err(|source| UploadError::Request {
                message: source.to_string(),
                source,
            })?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let url = format!("{}/api/v1/upload", self.base_url.trim_end_matches('/'));
        tracing::debug!("POST {} ({} bytes)", url, info.size);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|source| UploadError::Request {
                message: source.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<Value>().await {
                Ok(body) => body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| "An error occurred".to_string()),
                Err(_) => "An error occurred".to_string(),
            };
            return Err(UploadError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| UploadError::Request {
                message: format!("Invalid upload response: {}", source),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_with_size(dir: &TempDir, name: &str, bytes: u64) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(bytes).unwrap();
        path
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = validate_image(Path::new("/nonexistent/photo.png"));
        assert!(matches!(result, Err(UploadError::FileNotFound(_))));
    }

    #[test]
    fn test_gif_rejected() {
        let dir = TempDir::new().unwrap();
        let path = file_with_size(&dir, "photo.gif", 1024);
        assert!(matches!(
            validate_image(&path),
            Err(UploadError::InvalidType(_))
        ));
    }

    #[test]
    fn test_no_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = file_with_size(&dir, "photo", 1024);
        assert!(matches!(
            validate_image(&path),
            Err(UploadError::InvalidType(_))
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = file_with_size(&dir, "empty.png", 0);
        assert!(matches!(
            validate_image(&path),
            Err(UploadError::EmptyFile(_))
        ));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = file_with_size(&dir, "big.png", 6 * 1024 * 1024);
        assert!(matches!(validate_image(&path), Err(UploadError::TooLarge(_))));
    }

    #[test]
    fn test_exact_limit_accepted() {
        let dir = TempDir::new().unwrap();
        let path = file_with_size(&dir, "edge.webp", MAX_IMAGE_BYTES);
        let info = validate_image(&path).unwrap();
        assert_eq!(info.mime, "image/webp");
        assert_eq!(info.size, MAX_IMAGE_BYTES);
    }

    #[test]
    fn test_valid_png_accepted() {
        let dir = TempDir::new().unwrap();
        let path = file_with_size(&dir, "photo.png", 1024 * 1024);
        let info = validate_image(&path).unwrap();
        assert_eq!(info.mime, "image/png");
        assert_eq!(info.size, 1024 * 1024);
    }

    #[test]
    fn test_image_is_the_form_field_name() {
        assert_eq!(IMAGE_FIELD, "image");
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let dir = TempDir::new().unwrap();
        let path = file_with_size(&dir, "photo.JPG", 1024);
        let info = validate_image(&path).unwrap();
        assert_eq!(info.mime, "image/jpeg");
    }
}
