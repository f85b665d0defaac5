use thiserror::Error;

/// Failure inside the Argon2id hashing layer.
///
/// A wrong password is not an error: `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Could not derive password hash: {0}")]
    HashingFailed(String),

    /// The stored hash is not a PHC string this hasher understands
    #[error("Stored password hash unusable: {0}")]
    VerificationFailed(String),

    #[error("Argon2 rejected the work factor: {0}")]
    InvalidCost(String),
}
