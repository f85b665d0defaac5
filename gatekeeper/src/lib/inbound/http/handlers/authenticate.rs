use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::token::ports::TokenIssuer;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// `POST /login`: exchange a username and password for a bearer token.
pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = body?;

    let claims = state
        .user_service
        .login(&body.username, &body.password)
        .await?;

    let token = state.token_issuer.issue(&claims).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            message: format!("Welcome {}!", claims.username),
            token,
        },
    ))
}

// No Debug: the body holds a plaintext password.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub message: String,
    pub token: String,
}
