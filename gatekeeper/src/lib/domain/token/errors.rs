use thiserror::Error;

/// Error for token issuance and verification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Token rejected: {0}")]
    Rejected(String),

    #[error("Token expired")]
    Expired,
}

impl From<auth::JwtError> for TokenError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::EncodingFailed(msg) => TokenError::SigningFailed(msg),
            auth::JwtError::TokenExpired => TokenError::Expired,
            auth::JwtError::DecodingFailed(msg) | auth::JwtError::InvalidToken(msg) => {
                TokenError::Rejected(msg)
            }
        }
    }
}
