use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// `POST /register`: create a user record holding only the password hash.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    username: String,
    password: String,
    department: String,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok(CreateUserCommand::new(username, password, self.department))
    }
}
