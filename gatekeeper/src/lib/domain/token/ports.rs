use async_trait::async_trait;
use auth::Claims;

use crate::domain::token::errors::TokenError;

/// Signs claims into an opaque bearer token.
#[async_trait]
pub trait TokenIssuer: Send + Sync + 'static {
    /// Sign claims with the process-wide secret.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be serialized or signed
    async fn issue(&self, claims: &Claims) -> Result<String, TokenError>;
}

/// Checks a bearer token and recovers its claims.
///
/// Callers must await the verdict before admitting a request.
#[async_trait]
pub trait TokenVerifier: Send + Sync + 'static {
    /// Verify signature and structure.
    ///
    /// # Errors
    /// * `Rejected` - Malformed token or signature mismatch
    /// * `Expired` - Token carries an expiry in the past
    async fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}
