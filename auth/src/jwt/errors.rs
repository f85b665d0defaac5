use thiserror::Error;

/// Failure to sign or accept an access token.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Token signing failed: {0}")]
    EncodingFailed(String),

    /// Malformed token, wrong algorithm, or claims of the wrong shape
    #[error("Token could not be read: {0}")]
    DecodingFailed(String),

    #[error("Token lifetime has ended")]
    TokenExpired,

    /// Signature does not match the secret
    #[error("Token signature rejected: {0}")]
    InvalidToken(String),
}
