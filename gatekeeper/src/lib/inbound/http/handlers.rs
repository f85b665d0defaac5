use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::token::errors::TokenError;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod authenticate;
pub mod create_user;
pub mod list_users;

/// Body of every 401, whatever the cause.
pub const UNAUTHORIZED_MESSAGE: &str = "You shall not pass!";

/// Body of every 500. Details go to the log only.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Transport-level error. The single place failures become HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Detail is logged, never sent.
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string()),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidCredentials => ApiError::Unauthorized,
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::SigningFailed(_) => ApiError::InternalServerError(err.to_string()),
            TokenError::Rejected(_) | TokenError::Expired => ApiError::Unauthorized,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// User record as returned to clients.
///
/// Includes the stored password hash, which existing clients read from the
/// `password` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub department: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            password_hash: user.password_hash.clone(),
            department: user.department.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;
    use crate::user::errors::UsernameError;

    async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) = render(ApiError::from(UserError::DatabaseError(
            "relation \"users\" does not exist".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "message": "Something went wrong" }));
    }

    #[tokio::test]
    async fn test_invalid_credentials_and_rejected_token_share_message() {
        let (login_status, login_body) = render(UserError::InvalidCredentials.into()).await;
        let (gate_status, gate_body) =
            render(TokenError::Rejected("InvalidSignature".to_string()).into()).await;

        assert_eq!(login_status, StatusCode::UNAUTHORIZED);
        assert_eq!(gate_status, StatusCode::UNAUTHORIZED);
        assert_eq!(login_body, serde_json::json!({ "message": "You shall not pass!" }));
        assert_eq!(login_body, gate_body);
    }

    #[tokio::test]
    async fn test_validation_error_is_unprocessable() {
        let (status, body) =
            render(UserError::InvalidUsername(UsernameError::Empty).into()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("must not be empty"));
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ApiError::from(UserError::UsernameAlreadyExists("alice".to_string())),
            ApiError::Conflict("Username already exists: alice".to_string())
        );
        assert!(matches!(
            ApiError::from(TokenError::SigningFailed("key".to_string())),
            ApiError::InternalServerError(_)
        ));
        assert_eq!(ApiError::from(TokenError::Expired), ApiError::Unauthorized);
    }

    #[test]
    fn test_user_data_exposes_hash_under_password_key() {
        let user = User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "$argon2id$v=19$m=4096,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            department: "eng".to_string(),
        };

        let json = serde_json::to_value(UserData::from(&user)).unwrap();

        assert_eq!(json["password"], "$argon2id$v=19$m=4096,t=1,p=1$c2FsdA$aGFzaA");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["id"], user.id.to_string());
    }
}
