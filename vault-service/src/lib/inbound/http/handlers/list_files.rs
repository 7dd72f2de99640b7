use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_files(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ListFilesResponseData>, ApiError> {
    state.storage.ensure(&user.upload_path).await?;

    let files = state.storage.list_files(&user.upload_path).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListFilesResponseData { files },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFilesResponseData {
    pub files: Vec<String>,
}
