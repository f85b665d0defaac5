use std::fmt;

use uuid::Uuid;

use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// User record.
///
/// Owned by the store; the service only creates it at registration and reads it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub department: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Any string that is not blank, including email addresses and names with spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty or only whitespace
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password supplied by a client.
///
/// Lives only for the duration of a request. `Debug` is redacted so the value
/// cannot end up in logs through a derived `Debug` on an enclosing type.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MAX_BYTES: usize = 1024;

    /// Accept a plaintext password for hashing.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooLong` - Password exceeds 1024 bytes
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        if password.len() > Self::MAX_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_BYTES,
                actual: password.len(),
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub password: Password,
    pub department: String,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plaintext password (hashed by the service, never stored)
    /// * `department` - Free-form department name
    pub fn new(username: Username, password: Password, department: String) -> Self {
        Self {
            username,
            password,
            department,
        }
    }
}
