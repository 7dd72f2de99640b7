use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;

pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<ApiSuccess<CreateAccountResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateAccountRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreateAccountRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseCreateAccountRequestError> {
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterUserCommand::new(email, self.password))
    }
}

impl From<ParseCreateAccountRequestError> for ApiError {
    fn from(err: ParseCreateAccountRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAccountResponseData {
    pub message: String,
    pub user_id: String,
    pub email: String,
}

impl From<&User> for CreateAccountResponseData {
    fn from(user: &User) -> Self {
        Self {
            message: "Account created successfully".to_string(),
            user_id: user.id.to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}
