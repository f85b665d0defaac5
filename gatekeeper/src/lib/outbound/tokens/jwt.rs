use async_trait::async_trait;
use auth::Claims;
use auth::JwtHandler;

use crate::config::JwtConfig;
use crate::domain::token::errors::TokenError;
use crate::domain::token::ports::TokenIssuer;
use crate::domain::token::ports::TokenVerifier;

/// HS256 token adapter built once from the process-wide secret.
pub struct JwtTokenService {
    handler: JwtHandler,
    expiration_hours: Option<i64>,
}

impl JwtTokenService {
    /// # Arguments
    /// * `secret` - Signing secret shared by issuance and verification
    /// * `expiration_hours` - Token lifetime; `None` issues non-expiring tokens
    pub fn new(secret: &[u8], expiration_hours: Option<i64>) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            expiration_hours,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.as_bytes(), config.expiration_hours)
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenService {
    async fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let claims = match self.expiration_hours {
            Some(hours) => claims.clone().expiring_after_hours(hours),
            None => claims.clone(),
        };

        self.handler.encode(&claims).map_err(TokenError::from)
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenService {
    async fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.handler.decode(token).map_err(TokenError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    #[tokio::test]
    async fn test_issue_then_verify_round_trip() {
        let service = JwtTokenService::new(SECRET, None);
        let claims = Claims::for_user("4b7e9a52-1d7c-4c43-9b4e-5b0f1de0a111", "alice");

        let token = service.issue(&claims).await.unwrap();
        let decoded = service.verify(&token).await.unwrap();

        assert_eq!(decoded, claims);
    }

    #[tokio::test]
    async fn test_configured_expiry_is_stamped() {
        let service = JwtTokenService::new(SECRET, Some(2));
        let claims = Claims::for_user("1", "alice").with_issued_at(unix_now());

        let token = service.issue(&claims).await.unwrap();
        let decoded = service.verify(&token).await.unwrap();

        assert_eq!(decoded.exp, Some(claims.iat.unwrap() + 2 * 3600));
    }

    #[tokio::test]
    async fn test_lapsed_token_is_expired() {
        let service = JwtTokenService::new(SECRET, Some(1));
        let three_hours_ago = unix_now() - 3 * 3600;
        let claims = Claims::for_user("1", "alice").with_issued_at(three_hours_ago);

        let token = service.issue(&claims).await.unwrap();
        assert_eq!(service.verify(&token).await, Err(TokenError::Expired));
    }

    #[tokio::test]
    async fn test_foreign_secret_is_rejected() {
        let issuer = JwtTokenService::new(b"another-secret-key-of-sufficient-length!", None);
        let verifier = JwtTokenService::new(SECRET, None);

        let token = issuer.issue(&Claims::for_user("1", "alice")).await.unwrap();
        assert!(matches!(
            verifier.verify(&token).await,
            Err(TokenError::Rejected(_))
        ));
    }

    fn unix_now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }
}
