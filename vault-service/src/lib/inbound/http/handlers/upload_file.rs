use std::path::Component;
use std::path::Path;

use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Multipart field that carries the uploaded file.
const FILE_FIELD: &str = "file";

/// A filename is stored verbatim under the user's directory, so it must be
/// a single plain path component with no separators or traversal.
fn is_plain_filename(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

pub async fn upload_file(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<UploadFileResponseData>, ApiError> {
    // The directory may not exist yet if provisioning failed at registration
    state.storage.ensure(&user.upload_path).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .map(ToString::to_string)
            .ok_or_else(|| ApiError::BadRequest("Uploaded file has no filename".to_string()))?;

        if !is_plain_filename(&original_name) {
            return Err(ApiError::BadRequest(
                "Filename must be a plain name without path separators".to_string(),
            ));
        }

        let contents = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file contents: {}", e)))?;

        let stored_name = state
            .storage
            .store_file(&user.upload_path, &original_name, &contents)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            file = %stored_name,
            size = contents.len(),
            "File stored"
        );

        return Ok(ApiSuccess::new(
            StatusCode::CREATED,
            UploadFileResponseData {
                message: "File uploaded successfully".to_string(),
                file: stored_name,
            },
        ));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFileResponseData {
    pub message: String,
    pub file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filenames_are_accepted() {
        assert!(is_plain_filename("notes.txt"));
        assert!(is_plain_filename("report (final).pdf"));
        assert!(is_plain_filename("..hidden"));
    }

    #[test]
    fn test_filenames_with_separators_or_traversal_are_rejected() {
        assert!(!is_plain_filename("a/../escape.txt"));
        assert!(!is_plain_filename("/etc/passwd"));
        assert!(!is_plain_filename("dir\\escape.txt"));
        assert!(!is_plain_filename(".."));
        assert!(!is_plain_filename("."));
        assert!(!is_plain_filename(""));
    }
}
