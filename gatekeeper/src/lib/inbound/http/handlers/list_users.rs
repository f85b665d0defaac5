use auth::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// `GET /users`: every stored record. Only reachable through the access gate.
pub async fn list_users(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    tracing::debug!(user_id = %claims.user_id, "Listing users");

    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}
